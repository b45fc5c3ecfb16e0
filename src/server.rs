//! HTTP server lifecycle: bind, serve, graceful shutdown

use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::models::config::ServerConfig;
use crate::models::errors::{AppError, AppResult};

/// A bound, not yet serving, listener
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind the configured address. Port `0` picks a free port.
    pub async fn bind(config: &ServerConfig) -> AppResult<Self> {
        let addr = config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::bind_failed(&addr, e))?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` resolves, then let in-flight requests finish
    pub async fn serve<F>(self, router: Router, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %self.local_addr, "Server accepting connections");

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
///
/// The SIGTERM handler is registered when this is called, not when the
/// future is first polled, so a signal delivered in between is not lost.
/// Must be called from within the tokio runtime.
pub fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    #[cfg(unix)]
    let terminate = {
        use tokio::signal::unix::{signal, SignalKind};

        let sigterm = signal(SignalKind::terminate())
            .map_err(|e| warn!(error = %e, "Failed to install SIGTERM handler"))
            .ok();
        async move {
            match sigterm {
                Some(mut sigterm) => {
                    sigterm.recv().await;
                }
                None => std::future::pending::<()>().await,
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }

        info!("Shutdown signal received");
    }
}
