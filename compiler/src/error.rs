use thiserror::Error;

pub const ERROR_NOT_INTERFACE: &str = "marker only works on interfaces";
pub const ERROR_NULL_CONTEXT: &str = "context parameter must not be null";
pub const ERROR_PARAMETER_KEY: &str = "parameter must carry an extra-binding annotation";

#[derive(Debug, Error)]
pub enum IntentionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("{}", ERROR_NOT_INTERFACE)]
    NotAnInterface { element: String },

    #[error("{}", ERROR_NULL_CONTEXT)]
    MissingContext { method: String },

    #[error("{}", ERROR_PARAMETER_KEY)]
    MissingExtraBinding { method: String, parameter: String },

    #[error("routing method must return Request, found {found}")]
    WrongReturnType { method: String, found: String },

    #[error("Cannot resolve type {0}")]
    Unresolved(String),

    #[error("Processor is already initialized")]
    AlreadyInitialized,

    #[error("Processor used before init")]
    NotInitialized,

    #[error("{0}")]
    Internal(String),
}

impl IntentionError {
    /// Validation failures are reported against a declaration; everything
    /// else is an internal fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IntentionError::NotAnInterface { .. }
                | IntentionError::MissingContext { .. }
                | IntentionError::MissingExtraBinding { .. }
                | IntentionError::WrongReturnType { .. }
        )
    }
}
