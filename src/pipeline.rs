//! Quote -> build -> execute orchestration

use std::sync::Arc;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::aggregator::types::{ExecutableTransaction, Quote, SwapRequest};
use crate::aggregator::{AggregatorApi, QuoteService, TransactionBuilder};
use crate::execution::{ChainSigner, ExecutionReceipt, SwapExecutor};
use crate::shared::config::PipelineConfig;
use crate::shared::errors::SwapError;

/// Sequences the three swap stages, aborting on the first failure
///
/// Quoting and building are side-effect free: any failure there leaves the
/// chain untouched and is free to retry from scratch. Once the executor is
/// invoked the pipeline has committed; retrying is then a caller decision
/// that must start from a fresh quote. Concurrent runs are independent as
/// long as the signer serializes nonce allocation per account.
pub struct SwapPipeline {
    quotes: QuoteService,
    builder: TransactionBuilder,
    executor: SwapExecutor,
}

impl SwapPipeline {
    pub fn new(
        api: Arc<dyn AggregatorApi>,
        signer: Arc<dyn ChainSigner>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            quotes: QuoteService::new(api.clone())
                .with_max_slippage(config.aggregator.max_slippage_percent),
            builder: TransactionBuilder::new(api),
            executor: SwapExecutor::new(signer, &config.execution),
        }
    }

    /// Run the pre-commit stages only: quote and validate
    pub async fn quote(&self, request: &SwapRequest) -> Result<Quote, SwapError> {
        self.quotes.get_quote(request).await
    }

    /// Quote and build without broadcasting anything
    pub async fn prepare(
        &self,
        request: &SwapRequest,
    ) -> Result<(Quote, ExecutableTransaction), SwapError> {
        let quote = self.quotes.get_quote(request).await?;
        let transaction = self.builder.build(&quote).await?;
        Ok((quote, transaction))
    }

    /// Full swap: quote, build, execute
    pub async fn run(&self, request: &SwapRequest) -> Result<ExecutionReceipt, SwapError> {
        let attempt = Uuid::new_v4();
        let span = info_span!("swap", %attempt, chain_id = request.chain_id);
        async {
            info!(
                "Swapping {} of {} into {}",
                request.in_amount, request.in_token, request.out_token
            );
            let (quote, transaction) = self.prepare(request).await?;
            info!(
                "Executing against {} (quoted at block {})",
                quote.contract_address, quote.block_number
            );
            self.executor.execute(&transaction).await
        }
        .instrument(span)
        .await
    }
}
