//! Operator wallet management and transaction signing.
//!
//! # Security
//! - The private key is loaded ONLY from an environment variable (tests may
//!   inject one programmatically)
//! - Keys are never logged or serialized
//!
//! # Nonce discipline
//! The wallet carries a monotonic nonce counter. Syncing from the chain can
//! only move the counter forward, so concurrent submissions that were
//! already assigned a nonce locally are never reissued a lower one. The
//! submitter serializes assignment itself; see `mint::submitter`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{ChainError, ChainResult};

/// Environment variable name for the operator private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "MINT_RELAY_PRIVATE_KEY";

/// Signing identity that pays for and authorizes every mint.
#[derive(Debug)]
pub struct OperatorWallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Next nonce to assign. Only ever moves forward.
    nonce: Arc<AtomicU64>,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl OperatorWallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// The key must be exactly 64 hex digits, with an optional `0x` prefix.
    /// Anything else is a configuration error, reported without touching the
    /// network.
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> ChainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        if key_hex.len() != 64 || !key_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ChainError::Configuration(
                "Invalid private key format - must be 64 hex characters".to_string(),
            ));
        }

        let signer: PrivateKeySigner = key_hex.parse().map_err(|e| {
            ChainError::Configuration(format!("Invalid private key: {}", e))
        })?;

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Operator wallet initialized"
        );

        Ok(Self {
            signer,
            nonce: Arc::new(AtomicU64::new(0)),
            chain_id,
        })
    }

    /// Load the wallet from the `MINT_RELAY_PRIVATE_KEY` environment variable.
    pub fn from_env(chain_id: u64) -> ChainResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            ChainError::Configuration(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, chain_id)
    }

    /// Get the operator's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet is configured for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Build the network wallet used to sign full transactions.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }

    /// Sync the local counter with the chain's transaction count.
    ///
    /// The counter only moves forward: a stale chain read (e.g. pending
    /// transactions not yet counted) never causes a nonce to be reused.
    pub fn sync_nonce(&self, chain_nonce: u64) {
        self.nonce.fetch_max(chain_nonce, Ordering::SeqCst);
    }

    /// Take the next nonce, incrementing the counter.
    pub fn next_nonce(&self) -> u64 {
        self.nonce.fetch_add(1, Ordering::SeqCst)
    }

    /// Get current nonce without incrementing.
    pub fn current_nonce(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }
}

impl Clone for OperatorWallet {
    fn clone(&self) -> Self {
        Self {
            signer: self.signer.clone(),
            nonce: self.nonce.clone(),
            chain_id: self.chain_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = OperatorWallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet =
            OperatorWallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY), 1).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_key_must_be_64_hex_digits() {
        for bad in ["", "abc123", "not hex at all", &TEST_PRIVATE_KEY[..63]] {
            let err = OperatorWallet::from_private_key(bad, 1).unwrap_err();
            assert!(
                err.to_string().contains("64 hex characters"),
                "{bad:?} should be rejected as malformed"
            );
        }

        // 64 characters that are not all hex digits.
        let bad = format!("{}zz", &TEST_PRIVATE_KEY[..62]);
        let err = OperatorWallet::from_private_key(&bad, 1).unwrap_err();
        assert!(err.to_string().contains("64 hex characters"));
    }

    #[test]
    fn test_nonce_only_moves_forward() {
        let wallet = OperatorWallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();

        wallet.sync_nonce(5);
        assert_eq!(wallet.next_nonce(), 5);
        assert_eq!(wallet.next_nonce(), 6);

        // A stale chain read must not roll the counter back.
        wallet.sync_nonce(3);
        assert_eq!(wallet.current_nonce(), 7);
        assert_eq!(wallet.next_nonce(), 7);

        wallet.sync_nonce(100);
        assert_eq!(wallet.next_nonce(), 100);
    }
}
