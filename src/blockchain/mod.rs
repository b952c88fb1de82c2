//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (operator key) + config (RPC URLs)
//!     → wallet.rs (key validation, signing identity, nonce counter)
//!     → client.rs (RPC connection with timeouts and read failover)
//!     → mint::submitter (build, sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - The operator key is loaded ONLY from the environment (or injected
//!   programmatically in tests), never from config files
//! - Keys are never logged or serialized
//! - All RPC calls have configurable timeouts
//! - Broadcast goes through the primary endpoint only; retrying a broadcast
//!   on another endpoint could double-submit

pub mod client;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use types::{ChainError, ChainId, ChainResult};
pub use wallet::OperatorWallet;
