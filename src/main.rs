//! NFT Mint Relay (v1)
//!
//! A small service that accepts NFT mint requests over HTTP, submits the
//! corresponding transaction to an EVM chain through a single funded operator
//! account, waits for confirmation, and reports a structured outcome.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  MINT RELAY                   │
//!                        │                                               │
//!   POST /api/mint       │  ┌─────────┐    ┌───────────┐    ┌─────────┐ │
//!   ─────────────────────┼─▶│  http   │───▶│   mint    │───▶│blockchain│ │      EVM
//!                        │  │ server  │    │ submitter │    │  client  │─┼───▶ JSON-RPC
//!   JSON result          │  └─────────┘    └───────────┘    └─────────┘ │    endpoint
//!   ◀────────────────────┼───────┘               │               │      │
//!                        │                       ▼               ▼      │
//!                        │                 ┌───────────┐   ┌──────────┐ │
//!                        │                 │  operator │   │ receipts │ │
//!                        │                 │  wallet   │   │  + logs  │ │
//!                        │                 └───────────┘   └──────────┘ │
//!                        │                                               │
//!                        │  ┌─────────────────────────────────────────┐ │
//!                        │  │          Cross-Cutting Concerns          │ │
//!                        │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                        │  │  │ config │ │observability│ │lifecycle│ │ │
//!                        │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                        │  └─────────────────────────────────────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use mint_relay::config::{load_config, ServiceConfig};
use mint_relay::http::HttpServer;
use mint_relay::lifecycle::{wait_for_signal, Shutdown};
use mint_relay::mint::MintSubmitter;
use mint_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "mint-relay")]
#[command(about = "HTTP relay for NFT mint transactions", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mint-relay starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.blockchain.rpc_url,
        chain_id = config.blockchain.chain_id,
        confirmation_blocks = config.blockchain.confirmation_blocks,
        contract = %config.contract.address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // The operator context inside the submitter is constructed lazily on
    // first use; a missing or malformed signing key surfaces per request as
    // a configuration failure rather than preventing startup.
    let submitter = Arc::new(MintSubmitter::new(config.blockchain.clone()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config, submitter);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
