use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParcelError {
    #[error("Unexpected end of parcel at byte {0}")]
    UnexpectedEnd(usize),

    #[error("Invalid bool byte {0}")]
    InvalidBool(u8),

    #[error("Unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    #[error("Invalid parcel contents: {0}")]
    Invalid(String),
}
