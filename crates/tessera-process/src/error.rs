use thiserror::Error;

use tessera_core::CoreError;

/// Errors raised by the batch processors.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("processing was cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] CoreError),
}
