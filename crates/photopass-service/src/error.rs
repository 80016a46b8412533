//! Service-level error type.

use photopass_core::catalog::CatalogError;
use photopass_core::decode::DecodeError;
use photopass_core::encode::EncodeError;
use thiserror::Error;

use crate::oracle::OracleError;
use crate::payload::PayloadError;

/// Top-level error type for all service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("oracle request failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("image decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("image encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("invalid image payload: {0}")]
    Payload(#[from] PayloadError),

    /// Commit was requested before the oracle produced a normalized image.
    #[error("photo analysis has not completed")]
    AnalysisPending,

    #[error("background task failed: {0}")]
    Task(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServiceError::Task(err.to_string())
    }
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ServiceError>;
