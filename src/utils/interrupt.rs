use crate::utils::error::{Result, SeeFoodError};
use std::future::Future;

/// Awaits `fut` unless Ctrl-C arrives first.
///
/// If the signal handler cannot be installed the future is simply awaited.
pub async fn until_interrupted<F, T>(fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    until_signal(fut, tokio::signal::ctrl_c()).await
}

async fn until_signal<F, S, T>(fut: F, signal: S) -> Result<T>
where
    F: Future<Output = Result<T>>,
    S: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(fut);

    tokio::select! {
        res = &mut fut => res,
        signal = signal => match signal {
            Ok(()) => {
                tracing::warn!("Received Ctrl-C, stopping");
                Err(SeeFoodError::Interrupted)
            }
            Err(e) => {
                tracing::debug!("Could not listen for Ctrl-C: {}", e);
                fut.await
            }
        },
    }
}
