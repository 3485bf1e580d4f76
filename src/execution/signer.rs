use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::middleware::Middleware;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, Eip1559TransactionRequest, TxHash, U256};
use tokio::time::Instant;

use crate::aggregator::types::ExecutableTransaction;

/// Terminal confirmation outcomes observed on chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Included with success status
    Mined { block_number: u64 },
    /// Included but reverted
    Reverted { block_number: u64 },
    /// No inclusion observed before the deadline; the transaction may
    /// still confirm later out-of-band
    TimedOut,
}

/// Signing and broadcast capability, consumed abstractly
///
/// Nonce allocation is the implementation's concern and is expected to be
/// serialized per account, so independent pipeline runs can share a signer.
#[async_trait]
pub trait ChainSigner: Send + Sync {
    /// Sign and broadcast; returns the transaction hash
    async fn sign_and_send(&self, transaction: &ExecutableTransaction) -> Result<String>;

    /// Wait for inclusion up to `timeout`
    async fn await_confirmation(&self, tx_hash: &str, timeout: Duration) -> Result<Confirmation>;
}

/// ethers-backed signer: EIP-1559 broadcast plus receipt polling
pub struct EthersSigner<M> {
    client: M,
    poll_interval: Duration,
}

impl<M: Middleware + 'static> EthersSigner<M> {
    /// `client` is expected to be a `SignerMiddleware` (or equivalent)
    /// that owns the wallet and the nonce sequencing
    pub fn new(client: M, poll_interval: Duration) -> Self {
        Self { client, poll_interval }
    }
}

#[async_trait]
impl<M: Middleware + 'static> ChainSigner for EthersSigner<M> {
    async fn sign_and_send(&self, transaction: &ExecutableTransaction) -> Result<String> {
        let to: Address = transaction
            .to
            .parse()
            .with_context(|| format!("invalid to address '{}'", transaction.to))?;
        let data = Bytes::from(
            hex::decode(transaction.data.trim_start_matches("0x"))
                .context("invalid call data hex")?,
        );
        let value = if transaction.value.is_empty() || transaction.value == "0" {
            U256::zero()
        } else {
            U256::from_dec_str(&transaction.value).context("invalid value")?
        };

        let request = Eip1559TransactionRequest::new().to(to).data(data).value(value);
        let pending = self
            .client
            .send_transaction(TypedTransaction::Eip1559(request), None)
            .await
            .map_err(|e| anyhow::anyhow!("broadcast failed: {}", e))?;
        let tx_hash: TxHash = *pending;
        Ok(format!("{:#x}", tx_hash))
    }

    async fn await_confirmation(&self, tx_hash: &str, timeout: Duration) -> Result<Confirmation> {
        let hash: TxHash = tx_hash.parse().context("invalid transaction hash")?;
        let deadline = Instant::now() + timeout;
        loop {
            let receipt = self
                .client
                .get_transaction_receipt(hash)
                .await
                .map_err(|e| anyhow::anyhow!("receipt query failed: {}", e))?;
            if let Some(receipt) = receipt {
                let block_number = receipt.block_number.map(|b| b.as_u64()).unwrap_or_default();
                return Ok(if receipt.status == Some(1u64.into()) {
                    Confirmation::Mined { block_number }
                } else {
                    Confirmation::Reverted { block_number }
                });
            }
            if Instant::now() >= deadline {
                return Ok(Confirmation::TimedOut);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
