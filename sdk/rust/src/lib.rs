//! Client SDK for the mint relay HTTP API.

mod client;

pub use client::{MintRelayClient, MintRequest, MintResponse, ServiceStatus};
