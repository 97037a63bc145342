//! HTTP server module
//!
//! Accepts connections, routes each request and hands the decision to an
//! [`S3Handler`].
//!
//! # Example
//!
//! ```no_run
//! use s3emu_router::config::Config;
//! use s3emu_router::handler::ProbeHandler;
//! use s3emu_router::server::Server;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let server = Server::bind(Config::default(), Arc::new(ProbeHandler::new())).await?;
//! println!("Listening on {}", server.local_addr());
//! server.run_until(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! # Ok(())
//! # }
//! ```

mod service;

use crate::config::Config;
use crate::handler::S3Handler;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(String),

    #[error("Server error: {0}")]
    RuntimeError(String),
}

/// S3 HTTP server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    handler: Arc<dyn S3Handler>,
}

impl Server {
    /// Bind to `server.address`
    ///
    /// Port 0 lets the OS pick a port; see [`Server::local_addr`].
    pub async fn bind(config: Config, handler: Arc<dyn S3Handler>) -> Result<Self, ServerError> {
        let addr = config
            .server
            .socket_addr()
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(format!("Failed to bind to {}: {}", addr, e)))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::BindError(format!("Failed to get local address: {}", e)))?;

        info!(%local_addr, "Server bound");

        Ok(Self {
            listener,
            local_addr,
            handler,
        })
    }

    /// The address the server is listening on
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections forever
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// In-flight connections are left to finish on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        info!(addr = %self.local_addr, "Starting server");
        tokio::pin!(shutdown);

        loop {
            let (stream, peer_addr) = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down server");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                        continue;
                    }
                },
            };

            debug!(%peer_addr, "Accepted connection");
            let handler = Arc::clone(&self.handler);

            tokio::spawn(async move {
                let io = TokioIo::new(stream);
                let service = service_fn(move |req| {
                    let handler = Arc::clone(&handler);
                    async move { service::handle_request(req, handler).await }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    error!(%peer_addr, error = %e, "Error serving connection");
                }
            });
        }
    }
}
