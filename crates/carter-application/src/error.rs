//! Loader errors.

use carter_core::CarterError;
use thiserror::Error;

/// Failure of a view load.
///
/// Loaders only ever fail because a backend call failed; the operation
/// name is kept for diagnostics and the backend's error is the source.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("backend call '{operation}' failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: CarterError,
    },
}

impl LoadError {
    /// Name of the backend operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Backend { operation, .. } => operation,
        }
    }

    /// The backend's own failure.
    pub fn backend_error(&self) -> &CarterError {
        match self {
            Self::Backend { source, .. } => source,
        }
    }
}

/// Wraps a backend failure for `map_err`.
pub(crate) fn call_failed(operation: &'static str) -> impl FnOnce(CarterError) -> LoadError {
    move |source| LoadError::Backend { operation, source }
}
