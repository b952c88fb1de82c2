//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, multiplier sane)
//! - Check that configured addresses and URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use alloy::primitives::Address;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("'{}' is not a valid socket address", config.listener.bind_address),
        });
    }

    check_rpc_url(&config.blockchain.rpc_url, "blockchain.rpc_url", &mut errors);
    for url in &config.blockchain.failover_urls {
        check_rpc_url(url, "blockchain.failover_urls", &mut errors);
    }

    if config.blockchain.chain_id == 0 {
        errors.push(ValidationError {
            field: "blockchain.chain_id",
            message: "chain id must be non-zero".to_string(),
        });
    }

    if config.blockchain.confirmation_blocks == 0 {
        errors.push(ValidationError {
            field: "blockchain.confirmation_blocks",
            message: "at least one confirmation is required".to_string(),
        });
    }

    if config.blockchain.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError {
            field: "blockchain.receipt_poll_interval_ms",
            message: "poll interval must be non-zero".to_string(),
        });
    }

    if !config.blockchain.gas_price_multiplier.is_finite()
        || config.blockchain.gas_price_multiplier < 1.0
    {
        errors.push(ValidationError {
            field: "blockchain.gas_price_multiplier",
            message: format!(
                "multiplier {} must be a finite value >= 1.0",
                config.blockchain.gas_price_multiplier
            ),
        });
    }

    if config.blockchain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "blockchain.confirmation_timeout_secs",
            message: "confirmation timeout must be non-zero".to_string(),
        });
    }

    if config.timeouts.request_secs <= config.blockchain.confirmation_timeout_secs {
        errors.push(ValidationError {
            field: "timeouts.request_secs",
            message: "request timeout must exceed the confirmation timeout".to_string(),
        });
    }

    if !config.contract.address.is_empty() && config.contract.address.parse::<Address>().is_err() {
        errors.push(ValidationError {
            field: "contract.address",
            message: format!("'{}' is not a valid contract address", config.contract.address),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "'{}' is not a valid socket address",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_rpc_url(url: &str, field: &'static str, errors: &mut Vec<ValidationError>) {
    if url.is_empty() {
        errors.push(ValidationError {
            field,
            message: "URL must not be empty".to_string(),
        });
        return;
    }
    match url.parse::<url::Url>() {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        Ok(parsed) => errors.push(ValidationError {
            field,
            message: format!("unsupported URL scheme '{}'", parsed.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            message: format!("'{}' is not a valid URL: {}", url, e),
        }),
    }
}
