//! HTTP boundary for the relay.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → handlers.rs (content type + field validation, status mapping)
//!     → mint::MintSubmitter (the actual work)
//!     → JSON response {success, ...}
//! ```
//!
//! Status mapping: 415 for a wrong content type, 400 for validation
//! failures, 500 for configuration or minting failures. The classified
//! error message is relayed as the `error` field; raw chain client errors
//! and stack traces never cross this boundary.

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
