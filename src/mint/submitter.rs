//! Mint transaction submission and confirmation workflow.
//!
//! # Responsibilities
//! - Lazily construct the operator signing context, exactly once
//! - Encode, simulate, price, sign, and broadcast the mint call
//! - Wait for the configured confirmation depth
//! - Extract the minted token id from the receipt's logs
//! - Fold every failure into a classified `MintOutcome::Failure`
//!
//! # Ordering and partial failure
//! Steps up to and including gas estimation touch no chain state; a failure
//! there is safe to retry from the caller's side. From broadcast on, a
//! failure is ambiguous (the transaction may still land), so nothing is
//! retried here and callers must not blindly resubmit.
//!
//! # Idempotence
//! `mint` is NOT idempotent: two calls with identical arguments produce two
//! independent transactions. At-most-once semantics belong to the caller.

use std::sync::Arc;
use std::time::Instant;

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use tokio::sync::{Mutex, OnceCell};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult};
use crate::blockchain::wallet::{OperatorWallet, PRIVATE_KEY_ENV_VAR};
use crate::config::schema::BlockchainConfig;
use crate::mint::classify;
use crate::mint::events::{self, decode_owner, extract_minted_token_id, mint_call_data};
use crate::mint::types::MintOutcome;
use crate::observability::metrics;

/// Everything needed to sign and submit, built once per process.
struct OperatorContext {
    client: ChainClient,
    wallet: OperatorWallet,
    signer: EthereumWallet,
}

/// Confirmed mint, before folding into the public outcome type.
struct Minted {
    transaction_hash: TxHash,
    block_number: u64,
    token_id: Option<U256>,
}

/// Turns a validated mint request into an on-chain state change and a
/// structured outcome.
pub struct MintSubmitter {
    config: BlockchainConfig,
    /// Lazily initialized operator context. Initialization is guarded, so
    /// concurrent first calls construct it exactly once.
    context: OnceCell<Arc<OperatorContext>>,
    /// Serializes nonce assignment + broadcast across concurrent mints.
    /// Held only until the transaction hash is known, never through the
    /// confirmation wait.
    submit_lock: Mutex<()>,
}

impl MintSubmitter {
    /// Create a submitter. No key parsing or network traffic happens here;
    /// the operator context is built on first use.
    pub fn new(config: BlockchainConfig) -> Self {
        Self {
            config,
            context: OnceCell::new(),
            submit_lock: Mutex::new(()),
        }
    }

    /// Get or build the operator context.
    ///
    /// Key and endpoint validation run before anything touches the network,
    /// so a misconfigured relay fails fast with a configuration error and
    /// zero RPC traffic. After construction, a best-effort chain-id probe
    /// logs a warning on mismatch without failing the mint.
    async fn context(&self) -> ChainResult<&Arc<OperatorContext>> {
        self.context
            .get_or_try_init(|| async {
                let key = match &self.config.private_key {
                    Some(key) => key.clone(),
                    None => std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
                        ChainError::Configuration(format!(
                            "Environment variable {} not set",
                            PRIVATE_KEY_ENV_VAR
                        ))
                    })?,
                };
                let wallet = OperatorWallet::from_private_key(&key, self.config.chain_id)?;
                let client = ChainClient::new(&self.config)?;

                match client.verify_chain_id().await {
                    Ok(()) => {
                        tracing::info!(
                            operator = %wallet.address(),
                            chain_id = self.config.chain_id,
                            "Operator context initialized"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Operator context initialized but chain verification failed"
                        );
                    }
                }

                let signer = wallet.ethereum_wallet();
                Ok(Arc::new(OperatorContext {
                    client,
                    wallet,
                    signer,
                }))
            })
            .await
    }

    /// Submit a mint of `token_uri` to `recipient` against `contract` and
    /// wait until it is confirmed.
    ///
    /// Inputs must already satisfy the format invariants checked by
    /// `validate::is_valid_address` / `validate::is_valid_token_uri`.
    /// Never returns an error: every failure is classified into
    /// `MintOutcome::Failure` with an operator-actionable message.
    pub async fn mint(
        &self,
        contract: Address,
        recipient: Address,
        token_uri: &str,
    ) -> MintOutcome {
        let started = Instant::now();
        match self.mint_inner(contract, recipient, token_uri).await {
            Ok(minted) => {
                tracing::info!(
                    tx_hash = %minted.transaction_hash,
                    block_number = minted.block_number,
                    token_id = ?minted.token_id,
                    "Mint confirmed"
                );
                metrics::record_mint("success", started);
                MintOutcome::Success {
                    transaction_hash: minted.transaction_hash,
                    block_number: minted.block_number,
                    token_id: minted.token_id,
                }
            }
            Err(e) => {
                let error = classify::classify(&e);
                tracing::error!(error = %e, classified = %error, "Mint failed");
                metrics::record_mint(e.metric_label(), started);
                MintOutcome::Failure { error }
            }
        }
    }

    async fn mint_inner(
        &self,
        contract: Address,
        recipient: Address,
        token_uri: &str,
    ) -> ChainResult<Minted> {
        let ctx = self.context().await?;

        tracing::info!(
            recipient = %recipient,
            token_uri = %token_uri,
            contract = %contract,
            "Initiating mint"
        );

        let call_data = mint_call_data(recipient, token_uri);
        let request = TransactionRequest::default()
            .with_from(ctx.wallet.address())
            .with_to(contract)
            .with_input(call_data);

        // Dry run against current network state. A failure here means the
        // transaction would revert; nothing has been submitted.
        let gas_limit = ctx
            .client
            .estimate_gas(request.clone())
            .await
            .map_err(|e| ChainError::Simulation(e.to_string()))?;

        let gas_price = ctx.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;
        if gas_price_gwei > self.config.max_gas_price_gwei as u128 {
            return Err(ChainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: self.config.max_gas_price_gwei,
            });
        }
        let adjusted_gas_price = (gas_price as f64 * self.config.gas_price_multiplier) as u128;

        // Nonce assignment and broadcast are serialized per operator
        // account so concurrent mints get distinct, increasing nonces.
        let transaction_hash = {
            let _guard = self.submit_lock.lock().await;

            let chain_nonce = ctx.client.get_transaction_count(ctx.wallet.address()).await?;
            ctx.wallet.sync_nonce(chain_nonce);
            let nonce = ctx.wallet.next_nonce();

            let envelope = request
                .with_nonce(nonce)
                .with_gas_limit(gas_limit)
                .with_gas_price(adjusted_gas_price)
                .with_chain_id(ctx.wallet.chain_id())
                .build(&ctx.signer)
                .await
                .map_err(|e| ChainError::Wallet(format!("Failed to sign transaction: {}", e)))?;

            let hash = ctx.client.send_transaction(envelope).await?;
            tracing::info!(tx_hash = %hash, nonce = nonce, "Transaction submitted");
            hash
        };

        let receipt = ctx.client.wait_for_confirmations(transaction_hash).await?;
        let block_number = receipt.block_number.unwrap_or_default();

        let token_id = extract_minted_token_id(receipt.inner.logs());
        if token_id.is_none() {
            tracing::debug!(tx_hash = %transaction_hash, "No mint event found in receipt");
        }

        Ok(Minted {
            transaction_hash,
            block_number,
            token_id,
        })
    }

    /// Read-only balance of the operator account, for operational
    /// monitoring.
    pub async fn get_account_balance(&self) -> ChainResult<U256> {
        let ctx = self.context().await?;
        ctx.client.get_balance(ctx.wallet.address()).await
    }

    /// Best-effort read of a contract's `owner()`. Returns `None` on any
    /// failure (e.g., the contract has no such accessor).
    pub async fn verify_contract_owner(&self, contract: Address) -> Option<Address> {
        let ctx = self.context().await.ok()?;
        let request = TransactionRequest::default()
            .with_to(contract)
            .with_input(events::owner_call_data());
        let data = ctx.client.call(request).await.ok()?;
        decode_owner(&data)
    }

    /// Operator address, if the context has been initialized.
    pub fn operator_address(&self) -> Option<Address> {
        self.context.get().map(|ctx| ctx.wallet.address())
    }

    /// Whether the operator context has been initialized yet.
    pub fn is_initialized(&self) -> bool {
        self.context.initialized()
    }
}

impl std::fmt::Debug for MintSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintSubmitter")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
