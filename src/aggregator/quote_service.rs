use std::sync::Arc;

use tracing::info;

use crate::aggregator::types::{parse_amount, same_token, Quote, SwapRequest};
use crate::aggregator::validation::validate_quote;
use crate::aggregator::AggregatorApi;
use crate::shared::config::DEFAULT_MAX_SLIPPAGE_PERCENT;
use crate::shared::errors::SwapError;

/// Wraps the quote request/response cycle and vets the returned route
///
/// Deliberately retry-free: the quote's block number is its freshness
/// marker, and a transparent retry here would hand the caller a quote of
/// unknown age. Retry policy belongs to the orchestrator.
pub struct QuoteService {
    api: Arc<dyn AggregatorApi>,
    max_slippage_percent: f64,
}

impl QuoteService {
    pub fn new(api: Arc<dyn AggregatorApi>) -> Self {
        Self { api, max_slippage_percent: DEFAULT_MAX_SLIPPAGE_PERCENT }
    }

    pub fn with_max_slippage(mut self, max_slippage_percent: f64) -> Self {
        self.max_slippage_percent = max_slippage_percent;
        self
    }

    /// Fetch a quote for the request and validate it before handing it on
    pub async fn get_quote(&self, request: &SwapRequest) -> Result<Quote, SwapError> {
        self.check_request(request)?;
        let quote = self.api.fetch_quote(request).await?;
        validate_quote(&quote, request)?;
        info!(
            "✅ Quote: {} -> {} (min {}) at block {}",
            quote.in_amount, quote.out_amount, quote.min_received, quote.block_number
        );
        Ok(quote)
    }

    /// Reject requests the aggregator could never answer sensibly
    fn check_request(&self, request: &SwapRequest) -> Result<(), SwapError> {
        if same_token(&request.in_token, &request.out_token) {
            return Err(SwapError::InvalidRequest(
                "input and output token are the same".to_string(),
            ));
        }
        match parse_amount(&request.in_amount) {
            Some(amount) if amount > 0 => {}
            _ => {
                return Err(SwapError::InvalidRequest(format!(
                    "inAmount must be a positive integer string, got '{}'",
                    request.in_amount
                )));
            }
        }
        if !request.slippage.is_finite()
            || request.slippage < 0.0
            || request.slippage > self.max_slippage_percent
        {
            return Err(SwapError::InvalidRequest(format!(
                "slippage {} outside [0, {}]",
                request.slippage, self.max_slippage_percent
            )));
        }
        Ok(())
    }
}
