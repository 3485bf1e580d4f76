use std::sync::Arc;

use tracing::info;

use crate::aggregator::types::{ExecutableTransaction, Quote};
use crate::aggregator::AggregatorApi;
use crate::shared::errors::SwapError;

/// Converts a validated quote into a signable transaction
///
/// The build endpoint owns the encoding of route legs into call data;
/// this crate ships the quote payload verbatim and never re-derives call
/// data from exchange legs. The returned transaction is tied to the
/// quote's block number: if the chain moves past the caller's freshness
/// window before execution, re-quote instead of executing stale data.
pub struct TransactionBuilder {
    api: Arc<dyn AggregatorApi>,
}

impl TransactionBuilder {
    pub fn new(api: Arc<dyn AggregatorApi>) -> Self {
        Self { api }
    }

    pub async fn build(&self, quote: &Quote) -> Result<ExecutableTransaction, SwapError> {
        let transaction = self.api.build_transaction(quote).await?;
        info!(
            "✅ Built transaction to {} (value {}, {} bytes of call data)",
            transaction.to,
            transaction.value,
            transaction.data.trim_start_matches("0x").len() / 2
        );
        Ok(transaction)
    }
}
