//! Hyperswap - DEX aggregator swap pipeline
//! Quote, validate, build, and execute token swaps against a
//! Hypersonic-style aggregator API

pub mod aggregator;
pub mod execution;
pub mod pipeline;
pub mod shared;

// Re-export main types for convenience
pub use aggregator::types::{ExecutableTransaction, Quote, Route, SwapRequest};
pub use aggregator::{AggregatorApi, HypersonicClient, QuoteService, TransactionBuilder};
pub use execution::{ChainSigner, Confirmation, EthersSigner, ExecutionReceipt, SwapExecutor, SwapStatus};
pub use pipeline::SwapPipeline;
pub use shared::config::{ConfigLoader, PipelineConfig};
pub use shared::errors::{SwapError, ValidationError, ValidationReason};
