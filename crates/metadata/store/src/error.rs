use metadata_types::{AddressError, AddressKind};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] AddressError),

    #[error("wrong address kind for {expected} entry: {got}")]
    WrongKind { expected: AddressKind, got: AddressKind },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Backend(String),
}
