//! Gemini listener
//!
//! Accepts TCP connections, performs the TLS handshake and serves exactly
//! one request per connection. Each connection runs in its own task; the
//! accept loop stops when the shutdown future completes.

use anyhow::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, info, warn};

use crate::gateway::Gateway;
use crate::protocol::{RequestError, Response, read_request};

/// Serve one request on an established (already decrypted) stream
///
/// A client that does not finish its request line within `request_timeout`
/// is disconnected without a response.
///
/// # Errors
/// Returns error if reading from or writing to the stream fails
pub async fn handle_connection<S>(
    gateway: &Gateway,
    mut stream: S,
    request_timeout: Duration,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let response = match tokio::time::timeout(request_timeout, read_request(&mut stream)).await {
        Err(_) => {
            debug!("Timed out waiting for request line");
            return Ok(());
        }
        Ok(Err(RequestError::Io(e))) => return Err(e.into()),
        Ok(Err(e)) => {
            debug!("Rejected request: {}", e);
            Response::error(e.status(), &e.to_string())
        }
        Ok(Ok(url)) => {
            let response = gateway.respond(&url).await;
            info!(path = url.path(), status = %response.status(), "Served request");
            response
        }
    };

    response.write_to(&mut stream).await?;
    stream.shutdown().await?;
    Ok(())
}

/// TLS front end for a [`Gateway`]
#[derive(Clone)]
pub struct GeminiServer {
    gateway: Gateway,
    acceptor: TlsAcceptor,
    request_timeout: Duration,
}

impl std::fmt::Debug for GeminiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiServer")
            .field("gateway", &self.gateway)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiServer {
    #[must_use]
    pub const fn new(gateway: Gateway, acceptor: TlsAcceptor, request_timeout: Duration) -> Self {
        Self {
            gateway,
            acceptor,
            request_timeout,
        }
    }

    #[must_use]
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Run the accept loop until `shutdown` completes
    ///
    /// Failed accepts (e.g. file descriptor exhaustion) are logged and the
    /// loop keeps going; in-flight connections finish on their own tasks.
    pub async fn run<F>(self: Arc<Self>, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutdown initiated, stopping accept loop");
                    break;
                }

                accept_result = listener.accept() => {
                    let (stream, addr) = match accept_result {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            warn!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };

                    let server = Arc::clone(&self);
                    tokio::spawn(async move {
                        server.serve(stream, addr).await;
                    });
                }
            }
        }

        info!("Gemini gateway shutdown complete");
        Ok(())
    }

    async fn serve(&self, stream: tokio::net::TcpStream, addr: SocketAddr) {
        let handshake = tokio::time::timeout(self.request_timeout, self.acceptor.accept(stream));
        let tls = match handshake.await {
            Ok(Ok(tls)) => tls,
            Ok(Err(e)) => {
                debug!("TLS handshake with {} failed: {}", addr, e);
                return;
            }
            Err(_) => {
                debug!("TLS handshake with {} timed out", addr);
                return;
            }
        };

        if let Err(e) = handle_connection(&self.gateway, tls, self.request_timeout).await {
            // Clients routinely drop the connection after reading the header
            debug!("Error handling client {}: {}", addr, e);
        }
    }
}
