use mydaily_core::{AuthError, ResourceError};
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

/// Errors that carry a stable log code.
pub(crate) trait CodedError: Display {
    fn error_code(&self) -> &'static str;
}

impl CodedError for ResourceError {
    fn error_code(&self) -> &'static str {
        ResourceError::error_code(self)
    }
}

impl CodedError for AuthError {
    fn error_code(&self) -> &'static str {
        AuthError::error_code(self)
    }
}

/// Failure of a store call moved onto the blocking pool.
#[derive(Debug)]
pub(crate) enum BlockingFailure<E> {
    Service(E),
    /// The blocking task panicked or was cancelled.
    Join(JoinError),
}

impl<E: CodedError> BlockingFailure<E> {
    pub(crate) fn error_code(&self) -> &'static str {
        match self {
            Self::Service(err) => err.error_code(),
            Self::Join(_) => "task_failed",
        }
    }
}

impl<E: Display> Display for BlockingFailure<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Join(err) => write!(f, "{err}"),
        }
    }
}

/// Runs a synchronous store call without stalling the async runtime.
pub(crate) async fn run_blocking<T, E>(
    op: impl FnOnce() -> Result<T, E> + Send + 'static,
) -> Result<T, BlockingFailure<E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(result) => result.map_err(BlockingFailure::Service),
        Err(err) => Err(BlockingFailure::Join(err)),
    }
}
