//! Error types for the decoder layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps decoder-specific errors and converts them to [`ExtractError`].

use pdfsax_core::ExtractError;
use thiserror::Error;

/// Error type for document decoder operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is encrypted and cannot be decoded.
    #[error("document is encrypted")]
    Encrypted,
}

impl From<BackendError> for ExtractError {
    fn from(err: BackendError) -> Self {
        ExtractError::decode(err)
    }
}
