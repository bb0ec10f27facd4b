use crate::constants::{BAD_REQUEST, METHOD_NOT_ALLOWED, NOT_FOUND};
use crate::portfolio::controller::PortfolioController;
use crate::req::Method::{GET, POST};
use crate::req::Request;
use crate::res::Response;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot::Receiver;
use tracing::{error, info, warn};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct Server {
    portfolio: Arc<PortfolioController>,
}

impl Server {
    pub fn new(portfolio: Arc<PortfolioController>) -> Self {
        Self { portfolio }
    }

    pub async fn start(&self, address: &str, shutdown_rx: Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("failed to bind {}", address))?;
        self.serve(listener, shutdown_rx).await
    }

    pub async fn serve(&self, listener: TcpListener, mut shutdown_rx: Receiver<()>) -> Result<()> {
        info!("Server running on http://{}", listener.local_addr()?);

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let (mut stream, peer) = match conn {
                        Ok(conn) => conn,
                        Err(e) => {
                            warn!("unable to accept: {}", e);
                            tokio::time::sleep(ACCEPT_BACKOFF).await;
                            continue;
                        }
                    };

                    let portfolio = Arc::clone(&self.portfolio);

                    tokio::spawn(async move {
                        let (reader, writer) = stream.split();
                        if let Err(e) = Self::handle_client(reader, writer, &portfolio).await {
                            error!("Connection error from {}: {:#}", peer, e);
                        }
                    });
                }
                // Shutdown signal check
                _ = &mut shutdown_rx => {
                    info!("Shutting down server...");
                    break;
                }
            }
        }
        Ok(())
    }

    pub async fn handle_client<Reader, Writer>(
        reader: Reader,
        mut writer: Writer,
        portfolio: &Arc<PortfolioController>,
    ) -> Result<()>
    where
        Reader: AsyncRead + Unpin,
        Writer: AsyncWrite + Unpin,
    {
        let response = match Request::new(reader).await {
            Ok(request) => Self::route(&request, portfolio).await,
            Err(e) => {
                warn!("Malformed request: {:#}", e);
                Response::error(BAD_REQUEST, "malformed request")
            }
        };

        writer
            .write_all(response.to_http().as_bytes())
            .await
            .context("Failed to write")?;
        writer.flush().await.context("Failed to flush")
    }

    async fn route(request: &Request, portfolio: &PortfolioController) -> Response {
        let response = match (&request.method, request.path.as_str()) {
            (GET, "/total") => portfolio.total(request).await,
            (POST, "/add") => portfolio.add(request).await,
            (POST, "/remove") => portfolio.remove(request).await,
            (_, "/total" | "/add" | "/remove") => {
                Response::error(METHOD_NOT_ALLOWED, "Method not allowed")
            }
            _ => Response::error(NOT_FOUND, "Not found"),
        };
        info!(
            "{:?} {} -> {}",
            request.method,
            request.path,
            response.status_code()
        );
        response
    }
}
