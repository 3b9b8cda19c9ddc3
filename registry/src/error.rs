use faceauth_store::StoreError;
use thiserror::Error;

/// Errors returned by registry operations.
///
/// A verification that finds no close-enough record is NOT an error; it
/// is reported as [`crate::VerifyOutcome::NoMatch`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Missing or malformed input, reported before any store access.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Delete requested for a name with no record; nothing was mutated.
    #[error("no record named {0:?}")]
    NotFound(String),

    /// The roster could not be written back; the mutation is lost.
    #[error(transparent)]
    Store(#[from] StoreError),
}
