//! Host termination requests.

use log::{info, warn};

/// Resolves on the first Ctrl-C (SIGINT) or, on Unix, SIGTERM.
///
/// If no handler can be installed the future never resolves, so the monitor
/// keeps running rather than mistaking the error for a termination request.
pub async fn termination_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                let handled = tokio::select! {
                    result = tokio::signal::ctrl_c() => match result {
                        Ok(()) => {
                            info!("Received Ctrl-C");
                            true
                        }
                        Err(e) => {
                            warn!("Ctrl-C handler failed: {}", e);
                            false
                        }
                    },
                    _ = term.recv() => {
                        info!("Received SIGTERM");
                        true
                    }
                };
                if !handled {
                    term.recv().await;
                    info!("Received SIGTERM");
                }
                return;
            }
            Err(e) => warn!("Cannot listen for SIGTERM: {}", e),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C"),
        Err(e) => {
            warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
