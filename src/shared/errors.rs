//! Error handling for the application

use thiserror::Error;

/// Structural reasons a route or quote can fail validation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    #[error("route contains no paths")]
    EmptyRoute,

    #[error("path contains no hops")]
    EmptyPath,

    #[error("split percent out of range (0, 100]")]
    SplitPercentOutOfRange,

    #[error("fractional split percent")]
    FractionalPercent,

    #[error("route split percents do not sum to 100")]
    SplitPercentSum,

    #[error("exchange leg percents do not sum to 100")]
    LegPercentSum,

    #[error("consecutive hops do not share a token")]
    BrokenTokenChain,

    #[error("first hop does not start at the requested input token")]
    EntryTokenMismatch,

    #[error("last hop does not end at the requested output token")]
    ExitTokenMismatch,

    #[error("hop swaps a token for itself")]
    SelfLoopHop,

    #[error("unparsable amount field")]
    UnparsableAmount,

    #[error("minReceived exceeds outAmount")]
    MinReceivedExceedsOut,
}

/// Validation failure pinpointing the offending route element
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid route: {reason}")]
pub struct ValidationError {
    pub reason: ValidationReason,
    pub path_index: Option<usize>,
    pub hop_index: Option<usize>,
}

impl ValidationError {
    pub fn route(reason: ValidationReason) -> Self {
        Self { reason, path_index: None, hop_index: None }
    }

    pub fn path(reason: ValidationReason, path_index: usize) -> Self {
        Self { reason, path_index: Some(path_index), hop_index: None }
    }

    pub fn hop(reason: ValidationReason, path_index: usize, hop_index: usize) -> Self {
        Self { reason, path_index: Some(path_index), hop_index: Some(hop_index) }
    }
}

/// Swap pipeline errors
///
/// Post-broadcast outcomes (revert, confirmation timeout) are not errors;
/// they are reported through the execution receipt status.
#[derive(Error, Debug)]
pub enum SwapError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("quote rejected by aggregator: {0}")]
    QuoteRejected(String),

    #[error("build rejected by aggregator: {0}")]
    BuildRejected(String),

    #[error("malformed quote: {0}")]
    QuoteMalformed(#[from] ValidationError),

    #[error("invalid swap request: {0}")]
    InvalidRequest(String),

    #[error("transaction submission failed: {0}")]
    Submission(String),

    #[error("configuration error: {0}")]
    Config(String),
}
