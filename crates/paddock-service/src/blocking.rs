//! Offloads synchronous repository calls onto tokio's blocking pool.

use std::sync::Arc;

use paddock_core::error::PaddockError;

/// Run `f` against `repo` on a blocking thread and await its result.
///
/// A panicked or cancelled task surfaces as `PaddockError::Task`; the
/// closure's own errors pass through unchanged.
pub(crate) async fn run_blocking<R, T, F>(repo: &Arc<R>, f: F) -> Result<T, PaddockError>
where
    R: ?Sized + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&R) -> Result<T, PaddockError> + Send + 'static,
{
    let repo = Arc::clone(repo);
    tokio::task::spawn_blocking(move || f(&repo))
        .await
        .map_err(|e| PaddockError::Task(format!("Repository task failed: {}", e)))?
}
