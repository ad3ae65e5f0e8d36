//! Accept loop: one task per connection, one request per connection.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServeConfig;
use crate::error::{Result, ServeError};
use crate::http::{read_request, Response};
use crate::routes::route;

/// A bound server, ready to accept connections.
pub struct Server {
    config: Arc<ServeConfig>,
    listener: TcpListener,
}

impl Server {
    /// Bind to `config.bind`.
    pub async fn bind(config: ServeConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.bind.as_str()).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        Ok(Self {
            config: Arc::new(config),
            listener,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &ServeConfig {
        &self.config
    }

    /// Serve until the task is dropped.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` completes. In-flight connections keep running
    /// on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            tracing::warn!("accept failed: {e}");
                            continue;
                        }
                    };
                    let config = Arc::clone(&self.config);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(&config, stream).await {
                            tracing::debug!(%peer, "connection error: {e}");
                        }
                    });
                }
            }
        }
    }
}

/// Bind and serve with `config` until the task is dropped.
pub async fn serve(config: ServeConfig) -> Result<()> {
    Server::bind(config).await?.run().await
}

async fn handle_connection(config: &ServeConfig, mut stream: TcpStream) -> Result<()> {
    let (read_half, mut write_half) = stream.split();
    let mut reader = BufReader::new(read_half);

    let head = tokio::time::timeout(config.request_timeout(), read_request(&mut reader))
        .await
        .unwrap_or(Err(ServeError::RequestTimeout));

    let response = match head {
        Ok(Some(request)) => {
            let response = match route(config, &request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(method = %request.method, path = %request.path, "{e}");
                    Response::error(&e)
                }
            };
            tracing::info!(
                method = %request.method,
                path = %request.path,
                status = response.status.code(),
                "request"
            );
            response
        }
        Ok(None) => return Ok(()),
        Err(e) => {
            tracing::debug!("bad request head: {e}");
            Response::error(&e)
        }
    };

    response.write_to(&mut write_half).await?;
    write_half.shutdown().await?;
    Ok(())
}
