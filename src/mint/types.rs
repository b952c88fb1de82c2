//! Mint workflow types.

use alloy::primitives::{TxHash, U256};

/// Outcome of a mint attempt.
///
/// `token_id` is optional even on success: a receipt with no recognizable
/// mint event (non-standard contract, unexpected log shape) still confirms
/// that the transaction landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// The transaction was confirmed at the required depth.
    Success {
        /// Hash of the mint transaction.
        transaction_hash: TxHash,
        /// Block the transaction was included in.
        block_number: u64,
        /// Token id from the last Transfer-from-zero event, if any.
        token_id: Option<U256>,
    },
    /// The mint failed; `error` carries the classified, operator-actionable
    /// message (see `classify`).
    Failure { error: String },
}

impl MintOutcome {
    /// True for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, MintOutcome::Success { .. })
    }
}
