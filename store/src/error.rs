use thiserror::Error;

/// Errors returned by record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store: io error: {0}")]
    Io(String),

    #[error("store: serialize error: {0}")]
    Serialize(String),
}
