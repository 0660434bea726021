//! Stop flag for the HTTP server.
//!
//! The node owns one [`ShutdownController`]. The server's graceful-shutdown
//! future resolves when the flag is raised by [`stop`](ShutdownController::stop)
//! or when the process receives SIGINT/SIGTERM.

use std::future::Future;

use tokio::signal;
use tokio::sync::watch;

pub struct ShutdownController {
    stopped: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    /// Raise the flag. Takes effect even if no server is waiting yet.
    pub fn stop(&self) {
        self.stopped.send_replace(true);
    }

    /// Resolves once the flag is raised.
    pub fn stopped(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.stopped.subscribe();
        async move {
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    /// Resolves on [`stop`](Self::stop) or on SIGINT/SIGTERM, whichever is first.
    pub fn stopped_or_signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let stopped = self.stopped();
        let tx = self.stopped.clone();
        async move {
            tokio::select! {
                _ = stopped => {}
                _ = os_signal() => {
                    tx.send_replace(true);
                }
            }
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

async fn os_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
        _ = terminate => { tracing::info!("received SIGTERM, shutting down"); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn stop_before_waiting_is_not_lost() {
        let controller = ShutdownController::new();
        controller.stop();
        tokio::time::timeout(Duration::from_secs(1), controller.stopped())
            .await
            .expect("flag was already raised");
    }

    #[tokio::test]
    async fn waiter_wakes_on_stop() {
        let controller = ShutdownController::new();
        let waiter = tokio::spawn(controller.stopped());
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        controller.stop();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }
}
