pub mod auth;
pub mod campaigns;
pub mod engagement;
pub mod error;
pub mod matching;
pub mod middleware;
pub mod profile;

use error::{ApiError, ApiResult};

/// Run a closure over the blocking store off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("blocking task join error: {}", e)))?
}

