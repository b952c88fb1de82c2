//! Chain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoints
//! - Query chain state (block number, balances, receipts, gas)
//! - Simulate calls (gas estimation) and run read-only contract calls
//! - Broadcast signed transactions and wait for confirmation depth
//!
//! # Failover policy
//! Read calls iterate over the primary plus any failover endpoints.
//! Broadcast is primary-only and single-shot: resubmitting a transaction
//! through another endpoint after an ambiguous failure could mint twice.

use std::sync::Arc;
use std::time::Duration;

use alloy::consensus::TxEnvelope;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::TransportResult;
use tokio::time::{interval, timeout};

use crate::blockchain::types::{ChainError, ChainId, ChainResult};
use crate::config::schema::BlockchainConfig;
use crate::observability::metrics;

/// Chain RPC client wrapper with read failover support.
#[derive(Clone)]
pub struct ChainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client.
    ///
    /// Only parses and stores the configured endpoints; no network traffic
    /// happens here, so configuration problems surface before any RPC call.
    pub fn new(config: &BlockchainConfig) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Configuration(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(
            Arc::new(ProviderBuilder::new().connect_http(primary_url))
                as Arc<dyn Provider + Send + Sync>,
        );

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(
                    Arc::new(ProviderBuilder::new().connect_http(url))
                        as Arc<dyn Provider + Send + Sync>,
                );
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        Ok(Self {
            providers,
            config: config.clone(),
            timeout_duration,
        })
    }

    /// Run a read call against each provider in turn until one answers.
    ///
    /// The last RPC-level error is preserved: a deterministic failure such
    /// as a reverting simulation must reach the caller verbatim, not be
    /// replaced by a generic "all providers failed".
    async fn with_failover<T, F, Fut>(&self, op: &'static str, call: F) -> ChainResult<T>
    where
        F: Fn(Arc<dyn Provider + Send + Sync>) -> Fut,
        Fut: std::future::Future<Output = TransportResult<T>>,
    {
        let mut last_err: Option<String> = None;
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, call(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, op, error = %e, "RPC error, trying next provider");
                    last_err = Some(e.to_string());
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, op, "RPC timeout, trying next provider");
                }
            }
            metrics::record_rpc_failure(op);
        }
        match last_err {
            Some(message) => Err(ChainError::Rpc(message)),
            None => Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::Configuration(format!(
                "Chain ID mismatch: expected {}, got {}",
                self.config.chain_id, chain_id.0
            )));
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        self.with_failover("eth_chainId", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        self.with_failover("eth_blockNumber", |p| async move {
            p.get_block_number().await
        })
        .await
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> ChainResult<U256> {
        self.with_failover("eth_getBalance", move |p| async move {
            p.get_balance(address).await
        })
        .await
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> ChainResult<u64> {
        self.with_failover("eth_getTransactionCount", move |p| async move {
            p.get_transaction_count(address).await
        })
        .await
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> ChainResult<u128> {
        self.with_failover("eth_gasPrice", |p| async move { p.get_gas_price().await })
            .await
    }

    /// Estimate gas for a transaction against current network state.
    ///
    /// This is a read-only simulation: a revert here means the transaction
    /// would fail if sent, and nothing has been submitted.
    pub async fn estimate_gas(&self, tx: TransactionRequest) -> ChainResult<u64> {
        self.with_failover("eth_estimateGas", move |p| {
            let tx = tx.clone();
            async move { p.estimate_gas(tx).await }
        })
        .await
    }

    /// Execute a read-only contract call.
    pub async fn call(&self, tx: TransactionRequest) -> ChainResult<Bytes> {
        self.with_failover("eth_call", move |p| {
            let tx = tx.clone();
            async move { p.call(tx).await }
        })
        .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        self.with_failover("eth_getTransactionReceipt", move |p| async move {
            p.get_transaction_receipt(tx_hash).await
        })
        .await
    }

    /// Broadcast a signed transaction through the primary endpoint.
    ///
    /// Single-shot by design: an error here is ambiguous (the transaction
    /// may still have reached the network), so no failover and no retry.
    pub async fn send_transaction(&self, tx: TxEnvelope) -> ChainResult<TxHash> {
        let fut = self.primary().send_tx_envelope(tx);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(ChainError::Submission(e.to_string())),
            Err(_) => Err(ChainError::Submission(format!(
                "no response within {} seconds; the transaction may still have been broadcast",
                self.config.rpc_timeout_secs
            ))),
        }
    }

    /// Wait until a transaction reaches the configured confirmation depth.
    ///
    /// Polls for the receipt, then for the block height to advance
    /// `confirmation_blocks` past the inclusion block. Bounded by
    /// `confirmation_timeout_secs`; an inclusion with status 0 is a revert.
    pub async fn wait_for_confirmations(&self, tx_hash: TxHash) -> ChainResult<TransactionReceipt> {
        let required = self.config.confirmation_blocks;
        let timeout_duration = Duration::from_secs(self.config.confirmation_timeout_secs);
        let poll_interval = Duration::from_millis(self.config.receipt_poll_interval_ms);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(ChainError::Reverted(
                        "transaction execution reverted on-chain".to_string(),
                    ));
                }

                let current_block = self.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(_) => Err(ChainError::ConfirmationTimeout(
                self.config.confirmation_timeout_secs,
            )),
        }
    }

    /// Get the underlying primary provider.
    fn primary(&self) -> &(dyn Provider + Send + Sync) {
        self.providers[0].as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BlockchainConfig {
        BlockchainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            chain_id: 31337,
            rpc_timeout_secs: 1,
            ..BlockchainConfig::default()
        }
    }

    #[test]
    fn test_client_creation_is_offline() {
        // Construction must not require a reachable endpoint.
        let client = ChainClient::new(&test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let err = ChainClient::new(&config).unwrap_err();
        assert!(matches!(err, ChainError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_read_failover_preserves_last_error() {
        let mut config = test_config();
        // Both endpoints are unreachable; the resulting error must be an
        // RPC-level one (connection refused), not a silent success.
        config.failover_urls.push("http://127.0.0.1:2".to_string());

        let client = ChainClient::new(&config).unwrap();
        let err = client.get_chain_id().await.unwrap_err();
        assert!(matches!(err, ChainError::Rpc(_) | ChainError::Timeout(_)));
    }
}
