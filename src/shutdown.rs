//! Cancellation coordinator
//!
//! Turns a process interrupt into a cancelled [`CancellationToken`]. Every worker and
//! every in-flight fetch holds a clone of the token, so one signal reaches all of them.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels `token` once `signal` completes
///
/// Returns early, without cancelling, if the token is cancelled by someone else first.
pub async fn cancel_on<F>(signal: F, token: CancellationToken)
where
    F: Future<Output = ()>,
{
    tokio::select! {
        _ = token.cancelled() => {}
        _ = signal => {
            tracing::info!("Shutting down...");
            token.cancel();
        }
    }
}

/// Spawns a task cancelling `token` on Ctrl-C (and SIGTERM on unix)
///
/// Abort the returned handle once the run is over.
pub fn listen_for_shutdown(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(cancel_on(shutdown_signal(), token))
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!("Could not listen for SIGTERM: {}", e);
            return interrupt().await;
        }
    };

    tokio::select! {
        _ = interrupt() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    interrupt().await
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_signal_cancels_token() {
        let token = CancellationToken::new();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(cancel_on(
            async move {
                let _ = rx.await;
            },
            token.clone(),
        ));

        assert!(!token.is_cancelled());
        tx.send(()).unwrap();
        handle.await.unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_returns_when_token_cancelled_elsewhere() {
        let token = CancellationToken::new();
        let handle = tokio::spawn(cancel_on(std::future::pending(), token.clone()));

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("coordinator should exit")
            .unwrap();
    }

    #[tokio::test]
    async fn test_child_tokens_observe_cancellation() {
        let token = CancellationToken::new();
        let worker_token = token.clone();
        cancel_on(async {}, token).await;
        assert!(worker_token.is_cancelled());
    }
}
