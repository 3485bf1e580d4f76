pub mod http_client;
pub mod quote_service;
pub mod tx_builder;
pub mod types;
pub mod validation;

use async_trait::async_trait;

use crate::aggregator::types::{ExecutableTransaction, Quote, SwapRequest};
use crate::shared::errors::SwapError;

pub use http_client::HypersonicClient;
pub use quote_service::QuoteService;
pub use tx_builder::TransactionBuilder;

/// Базовый trait для клиентов aggregator API
///
/// Implementations own envelope handling: a 200 with `success: false`
/// becomes `QuoteRejected`/`BuildRejected`, transport failures become
/// `Transport`.
#[async_trait]
pub trait AggregatorApi: Send + Sync {
    /// Request a best-execution route for the swap
    async fn fetch_quote(&self, request: &SwapRequest) -> Result<Quote, SwapError>;

    /// Turn a quote into a signable transaction
    async fn build_transaction(&self, quote: &Quote) -> Result<ExecutableTransaction, SwapError>;
}

#[cfg(test)]
pub mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::aggregator::types::{ExchangeLeg, Hop, Route, SplitPath};
    use serde_json::Map;

    pub const IN_TOKEN: &str = "0x039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38";
    pub const OUT_TOKEN: &str = "0x29219dd400f2bf60e5a23d13be72b486d4038894";
    pub const CONTRACT: &str = "0x1111111111111111111111111111111111111111";

    pub fn sample_request() -> SwapRequest {
        SwapRequest {
            chain_id: 146,
            in_token: IN_TOKEN.to_string(),
            out_token: OUT_TOKEN.to_string(),
            in_amount: "1000000000000000000".to_string(),
            slippage: 1.0,
            ref_code: None,
        }
    }

    pub fn sample_quote() -> Quote {
        Quote {
            chain_id: 146,
            in_token: IN_TOKEN.to_string(),
            out_token: OUT_TOKEN.to_string(),
            in_amount: "1000000000000000000".to_string(),
            in_decimals: Some(18),
            out_decimals: Some(6),
            out_amount: "703174".to_string(),
            min_received: "696212".to_string(),
            best_route: Route {
                paths: vec![SplitPath {
                    percent: 100.0,
                    hops: vec![Hop {
                        in_token: IN_TOKEN.to_string(),
                        in_decimals: 18,
                        out_token: OUT_TOKEN.to_string(),
                        out_decimals: 6,
                        exchanges: vec![ExchangeLeg {
                            exchange: "shadow-v3".to_string(),
                            in_amount: "1000000000000000000".to_string(),
                            out_amount: "703174".to_string(),
                            percent: 100.0,
                            routing: Map::new(),
                        }],
                    }],
                }],
            },
            contract_address: CONTRACT.to_string(),
            contract_method: Some("swap".to_string()),
            block_number: 42_042_042,
            extra: Map::new(),
        }
    }

    enum QuoteBehavior {
        Succeed(Quote),
        Reject(String),
    }

    enum BuildBehavior {
        Succeed,
        Reject(String),
    }

    /// In-memory aggregator with call counters for side-effect assertions
    pub struct MockAggregator {
        quote: QuoteBehavior,
        build: BuildBehavior,
        quote_calls: AtomicUsize,
        build_calls: AtomicUsize,
    }

    impl MockAggregator {
        pub fn quoting(quote: Quote) -> Self {
            Self {
                quote: QuoteBehavior::Succeed(quote),
                build: BuildBehavior::Succeed,
                quote_calls: AtomicUsize::new(0),
                build_calls: AtomicUsize::new(0),
            }
        }

        pub fn rejecting_quotes(message: &str) -> Self {
            Self {
                quote: QuoteBehavior::Reject(message.to_string()),
                build: BuildBehavior::Succeed,
                quote_calls: AtomicUsize::new(0),
                build_calls: AtomicUsize::new(0),
            }
        }

        pub fn rejecting_builds(message: &str) -> Self {
            Self {
                quote: QuoteBehavior::Succeed(sample_quote()),
                build: BuildBehavior::Reject(message.to_string()),
                quote_calls: AtomicUsize::new(0),
                build_calls: AtomicUsize::new(0),
            }
        }

        pub fn quote_calls(&self) -> usize {
            self.quote_calls.load(Ordering::SeqCst)
        }

        pub fn build_calls(&self) -> usize {
            self.build_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AggregatorApi for MockAggregator {
        async fn fetch_quote(&self, _request: &SwapRequest) -> Result<Quote, SwapError> {
            self.quote_calls.fetch_add(1, Ordering::SeqCst);
            match &self.quote {
                QuoteBehavior::Succeed(quote) => Ok(quote.clone()),
                QuoteBehavior::Reject(message) => Err(SwapError::QuoteRejected(message.clone())),
            }
        }

        async fn build_transaction(
            &self,
            quote: &Quote,
        ) -> Result<ExecutableTransaction, SwapError> {
            self.build_calls.fetch_add(1, Ordering::SeqCst);
            match &self.build {
                BuildBehavior::Succeed => Ok(ExecutableTransaction {
                    to: quote.contract_address.clone(),
                    data: "0xdeadbeef".to_string(),
                    value: "0".to_string(),
                }),
                BuildBehavior::Reject(message) => Err(SwapError::BuildRejected(message.clone())),
            }
        }
    }
}
