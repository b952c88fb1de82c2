//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (timeout, tracing)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::ServiceConfig;
use crate::http::handlers;
use crate::mint::MintSubmitter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// The mint workflow.
    pub submitter: Arc<MintSubmitter>,
    /// Configured collection contract, if any. `None` makes mint requests
    /// fail with a misconfiguration error rather than preventing startup.
    pub contract: Option<Address>,
    /// Chain the relay is configured against, for status reporting.
    pub chain_id: u64,
}

/// HTTP server for the mint relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, submitter: Arc<MintSubmitter>) -> Self {
        let contract = match config.contract.address.parse() {
            Ok(address) => Some(address),
            Err(_) => {
                if !config.contract.address.is_empty() {
                    tracing::error!(
                        address = %config.contract.address,
                        "Configured contract address does not parse; mint requests will be rejected"
                    );
                }
                None
            }
        };

        let state = AppState {
            submitter,
            contract,
            chain_id: config.blockchain.chain_id,
        };

        let router = Router::new()
            .route("/api/mint", post(handlers::mint).get(handlers::mint_status))
            .route("/api/operator", get(handlers::operator))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
