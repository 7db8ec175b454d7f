//! Per-call time limit shared by the repository implementations.

use std::future::Future;
use std::time::Duration;

use crate::error::RepoError;

/// Default bound on a single repository call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Run `fut`, failing with [`RepoError::Timeout`] once `limit` elapses.
pub(crate) async fn bounded<T, F>(op: &'static str, limit: Duration, fut: F) -> Result<T, RepoError>
where
    F: Future<Output = Result<T, RepoError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation = op,
                timeout_ms = limit.as_millis() as u64,
                "Repository call timed out"
            );
            Err(RepoError::Timeout)
        }
    }
}
