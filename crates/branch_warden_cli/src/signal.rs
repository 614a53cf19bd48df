//! Shutdown signal handling for periodic mode.

use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info};

/// Waits for CTRL+C (SIGINT) or, on Unix, SIGTERM.
///
/// If a handler cannot be installed the error is logged and that signal is never
/// reported.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received CTRL+C, stopping after the current check");
        },
        _ = terminate => {
            info!("Received SIGTERM, stopping after the current check");
        },
    }
}

/// Spawns a task that watches for shutdown signals.
///
/// The returned receiver completes once a signal arrives. Must be called from within a
/// Tokio runtime.
pub fn spawn_shutdown_listener() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = tx.send(());
    });
    rx
}
