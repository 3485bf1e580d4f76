//! Submission and confirmation of built swap transactions

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::aggregator::types::ExecutableTransaction;
use crate::execution::signer::{ChainSigner, Confirmation};
use crate::shared::config::ExecutionConfig;
use crate::shared::errors::SwapError;

/// Terminal status of one executed swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStatus {
    Confirmed { block_number: u64 },
    /// Included on chain but reverted; an operational outcome, not an error
    Reverted { block_number: u64 },
    /// No confirmation within the deadline; the transaction may still land,
    /// so the caller must reconcile via the hash before retrying
    TimedOut,
}

/// Outcome of a broadcast swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReceipt {
    pub transaction_hash: String,
    pub status: SwapStatus,
}

impl ExecutionReceipt {
    pub fn is_confirmed(&self) -> bool {
        matches!(self.status, SwapStatus::Confirmed { .. })
    }

    pub fn block_number(&self) -> Option<u64> {
        match self.status {
            SwapStatus::Confirmed { block_number } | SwapStatus::Reverted { block_number } => {
                Some(block_number)
            }
            SwapStatus::TimedOut => None,
        }
    }
}

/// Signs, broadcasts, and confirms exactly one transaction per call
///
/// State machine: Pending -> Broadcast -> Confirmed | Reverted | TimedOut.
/// Submission failure is terminal for the transaction object; it is never
/// resubmitted here because a second broadcast of the same payload risks
/// duplicate nonce use.
pub struct SwapExecutor {
    signer: Arc<dyn ChainSigner>,
    confirm_timeout: Duration,
}

impl SwapExecutor {
    pub fn new(signer: Arc<dyn ChainSigner>, config: &ExecutionConfig) -> Self {
        Self {
            signer,
            confirm_timeout: Duration::from_millis(config.confirm_timeout_ms),
        }
    }

    /// Pending -> Broadcast, then wait for a terminal confirmation status
    ///
    /// Everything after a successful broadcast is reported through the
    /// receipt, never raised: a revert or a timeout is expected operational
    /// behavior.
    pub async fn execute(
        &self,
        transaction: &ExecutableTransaction,
    ) -> Result<ExecutionReceipt, SwapError> {
        let transaction_hash = self
            .signer
            .sign_and_send(transaction)
            .await
            .map_err(|e| SwapError::Submission(e.to_string()))?;
        info!("🚀 Broadcast transaction {}", transaction_hash);

        // Outer timeout bounds a signer that ignores its own deadline.
        let wait = self
            .signer
            .await_confirmation(&transaction_hash, self.confirm_timeout);
        let status = match tokio::time::timeout(self.confirm_timeout, wait).await {
            Ok(Ok(Confirmation::Mined { block_number })) => {
                info!("✅ Confirmed in block {}", block_number);
                SwapStatus::Confirmed { block_number }
            }
            Ok(Ok(Confirmation::Reverted { block_number })) => {
                warn!("❌ Reverted in block {}", block_number);
                SwapStatus::Reverted { block_number }
            }
            Ok(Ok(Confirmation::TimedOut)) => SwapStatus::TimedOut,
            Ok(Err(e)) => {
                // Post-broadcast the outcome is ambiguous either way; the
                // caller reconciles via the hash.
                warn!("⚠️ Confirmation polling failed for {}: {}", transaction_hash, e);
                SwapStatus::TimedOut
            }
            Err(_) => SwapStatus::TimedOut,
        };
        if status == SwapStatus::TimedOut {
            warn!(
                "⏳ No confirmation for {} within {:?}; transaction may still land",
                transaction_hash, self.confirm_timeout
            );
        }

        Ok(ExecutionReceipt { transaction_hash, status })
    }
}
