//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the mint relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Chain connection and submission settings.
    pub blockchain: BlockchainConfig,

    /// The collection contract mints are submitted against.
    pub contract: ContractConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    ///
    /// A mint request stays open through the confirmation wait, so this must
    /// be comfortably larger than `blockchain.confirmation_timeout_secs`.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 600 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Chain connection and transaction submission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs, used for read calls only.
    /// Transactions are broadcast through the primary endpoint exclusively.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 8453 for Base mainnet, 84532 for Base Sepolia).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required before a mint is reported.
    pub confirmation_blocks: u32,

    /// Upper bound on the confirmation wait, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval during the confirmation wait, in ms.
    pub receipt_poll_interval_ms: u64,

    /// Gas price multiplier (1.0 = as quoted, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against fee spikes).
    pub max_gas_price_gwei: u64,

    /// Operator signing key override. Never populated from config files;
    /// production deployments supply the key via the environment and tests
    /// inject it here directly.
    #[serde(skip)]
    pub private_key: Option<String>,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 1,
            rpc_timeout_secs: 10,
            confirmation_blocks: 2,
            confirmation_timeout_secs: 300,
            receipt_poll_interval_ms: 2000,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
            private_key: None,
        }
    }
}

/// Collection contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the pre-deployed collection contract. Empty means the
    /// relay starts but rejects mint requests as misconfigured.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.blockchain.confirmation_blocks, 2);
        assert_eq!(config.blockchain.rpc_timeout_secs, 10);
        assert!(config.blockchain.private_key.is_none());
        assert!(config.contract.address.is_empty());
    }

    #[test]
    fn test_minimal_toml() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [blockchain]
            rpc_url = "https://sepolia.base.org"
            chain_id = 84532

            [contract]
            address = "0x2Fcb8200b5B20F2eC53c80D95941eC7aE8145d26"
            "#,
        )
        .unwrap();
        assert_eq!(config.blockchain.chain_id, 84532);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.blockchain.confirmation_blocks, 2);
        assert_eq!(config.timeouts.request_secs, 600);
    }

    #[test]
    fn test_private_key_not_deserialized_from_file() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [blockchain]
            rpc_url = "http://localhost:8545"
            private_key = "deadbeef"
            "#,
        )
        .unwrap();
        // serde(skip): a key smuggled into the file is ignored.
        assert!(config.blockchain.private_key.is_none());
    }
}
