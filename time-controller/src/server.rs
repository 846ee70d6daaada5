//! Control server
//!
//! Builds the axum router around a shared [`TimeControl`] implementation and
//! serves it until a shutdown signal arrives.

use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use shared::{logging, process_info, ProcessId};
use supervisor::TimeControl;

use crate::error::{ControllerError, ControllerResult};
use crate::handlers;

/// HTTP front end for a time controller
pub struct ControlServer<T>
where
    T: TimeControl,
{
    bind_address: SocketAddr,
    control: Arc<T>,
}

impl<T> ControlServer<T>
where
    T: TimeControl + 'static,
{
    pub fn new(bind_address: SocketAddr, control: Arc<T>) -> Self {
        Self { bind_address, control }
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/set_time", post(handlers::set_time::<T>))
            .route("/status", get(handlers::status::<T>))
            .route("/health", get(handlers::health))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).into_inner())
            .with_state(self.control.clone())
    }

    /// Bind the configured address
    pub async fn bind(&self) -> ControllerResult<TcpListener> {
        TcpListener::bind(self.bind_address)
            .await
            .map_err(|source| ControllerError::ServerStartupFailed {
                addr: self.bind_address,
                source,
            })
    }

    /// Bind and serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> ControllerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> ControllerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        process_info!(ProcessId::current(), "🌐 Time controller listening on http://{}", local_addr);

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            logging::log_error(ProcessId::current(), "Ctrl+C handling", &err);
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                logging::log_error(ProcessId::current(), "SIGTERM handling", &err);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        _ = terminate => logging::log_shutdown(ProcessId::current(), "Received SIGTERM"),
    }
}
