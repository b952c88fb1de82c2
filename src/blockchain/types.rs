//! Chain-specific types and error definitions.

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur while preparing, submitting, or confirming a
/// transaction.
///
/// Variants are grouped by where in the lifecycle they occur: everything up
/// to and including `Simulation` happens before any chain state is touched.
/// `Submission` and later are ambiguous; the transaction may have been
/// broadcast, so the caller must not blindly retry.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Missing or malformed operator key or RPC endpoint. Detected before
    /// any network call is made.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Gas estimation (dry run) failed; the transaction would revert and was
    /// never submitted.
    #[error("Gas estimation failed: {0}")]
    Simulation(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Invalid private key format, derivation failure, or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Transaction broadcast failed. The outcome is ambiguous: the
    /// transaction may still have reached the network.
    #[error("Transaction submission failed: {0}")]
    Submission(String),

    /// Transaction was not confirmed within the configured window. It may
    /// still land later.
    #[error("Transaction not confirmed after {0} seconds")]
    ConfirmationTimeout(u64),

    /// Transaction was included on-chain but reverted.
    #[error("Transaction reverted: {0}")]
    Reverted(String),
}

impl ChainError {
    /// Stable low-cardinality label for metrics.
    pub fn metric_label(&self) -> &'static str {
        match self {
            ChainError::Configuration(_) => "configuration",
            ChainError::Rpc(_) => "rpc",
            ChainError::Timeout(_) => "timeout",
            ChainError::Simulation(_) => "simulation",
            ChainError::GasPriceTooHigh { .. } => "gas_price",
            ChainError::Wallet(_) => "wallet",
            ChainError::Submission(_) => "submission",
            ChainError::ConfirmationTimeout(_) => "confirmation_timeout",
            ChainError::Reverted(_) => "reverted",
        }
    }
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
