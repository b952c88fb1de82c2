//! NFT Mint Relay Library

pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mint;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mint::{MintOutcome, MintSubmitter};
