use intention_schema::ParcelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtraError {
    #[error("Extra \"{key}\" holds {found}, expected {expected}")]
    TypeMismatch {
        key:      String,
        expected: &'static str,
        found:    &'static str,
    },

    #[error("Extra \"{key}\" could not be unparceled: {source}")]
    Parcel {
        key:    String,
        #[source]
        source: ParcelError,
    },

    #[error("Extra \"{key}\" could not be deserialized: {source}")]
    Serialized {
        key:    String,
        #[source]
        source: serde_json::Error,
    },
}
