//! Structural validation of aggregator routes and quotes
//!
//! A quote must never reach the build endpoint unless its route passes
//! these checks; signing a transaction derived from an inconsistent route
//! is how aggregator-side corruption turns into lost funds.

use crate::aggregator::types::{parse_amount, same_token, Quote, Route, SwapRequest};
use crate::shared::errors::{ValidationError, ValidationReason};

/// Percent values on the wire are floats, but the aggregator's split
/// accounting is integral; anything fractional is malformed.
fn whole_percent(p: f64) -> Option<u32> {
    if p.is_finite() && p > 0.0 && p <= 100.0 && p.fract() == 0.0 {
        Some(p as u32)
    } else {
        None
    }
}

/// Validate route structure against the request it was quoted for
///
/// Checks run in order and short-circuit on the first failure:
/// 1. route is non-empty;
/// 2. path split percents are whole, in (0, 100], and sum to exactly 100;
/// 3. each hop's exchange leg percents follow the same rule;
/// 4. hops chain token-to-token and the path endpoints match the request;
/// 5. no hop swaps a token for itself.
pub fn validate_route(route: &Route, request: &SwapRequest) -> Result<(), ValidationError> {
    if route.paths.is_empty() {
        return Err(ValidationError::route(ValidationReason::EmptyRoute));
    }

    let mut split_total: u32 = 0;
    for (pi, path) in route.paths.iter().enumerate() {
        match whole_percent(path.percent) {
            Some(p) => split_total += p,
            None if path.percent.fract() != 0.0 => {
                return Err(ValidationError::path(ValidationReason::FractionalPercent, pi));
            }
            None => {
                return Err(ValidationError::path(ValidationReason::SplitPercentOutOfRange, pi));
            }
        }
    }
    if split_total != 100 {
        return Err(ValidationError::route(ValidationReason::SplitPercentSum));
    }

    for (pi, path) in route.paths.iter().enumerate() {
        for (hi, hop) in path.hops.iter().enumerate() {
            let mut leg_total: u32 = 0;
            for leg in &hop.exchanges {
                match whole_percent(leg.percent) {
                    Some(p) => leg_total += p,
                    None if leg.percent.fract() != 0.0 => {
                        return Err(ValidationError::hop(ValidationReason::FractionalPercent, pi, hi));
                    }
                    None => {
                        return Err(ValidationError::hop(
                            ValidationReason::SplitPercentOutOfRange,
                            pi,
                            hi,
                        ));
                    }
                }
            }
            if leg_total != 100 {
                return Err(ValidationError::hop(ValidationReason::LegPercentSum, pi, hi));
            }
        }
    }

    for (pi, path) in route.paths.iter().enumerate() {
        let (first, last) = match (path.hops.first(), path.hops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ValidationError::path(ValidationReason::EmptyPath, pi)),
        };
        if !same_token(&first.in_token, &request.in_token) {
            return Err(ValidationError::hop(ValidationReason::EntryTokenMismatch, pi, 0));
        }
        if !same_token(&last.out_token, &request.out_token) {
            return Err(ValidationError::hop(
                ValidationReason::ExitTokenMismatch,
                pi,
                path.hops.len() - 1,
            ));
        }
        for (hi, pair) in path.hops.windows(2).enumerate() {
            if !same_token(&pair[0].out_token, &pair[1].in_token) {
                return Err(ValidationError::hop(ValidationReason::BrokenTokenChain, pi, hi));
            }
        }
    }

    for (pi, path) in route.paths.iter().enumerate() {
        for (hi, hop) in path.hops.iter().enumerate() {
            if same_token(&hop.in_token, &hop.out_token) {
                return Err(ValidationError::hop(ValidationReason::SelfLoopHop, pi, hi));
            }
        }
    }

    Ok(())
}

/// Validate a full quote: amount invariants first, then route structure
///
/// The exact minReceived rounding is the aggregator's policy and is not
/// re-derived here; only the hard bound minReceived <= outAmount is
/// enforced.
pub fn validate_quote(quote: &Quote, request: &SwapRequest) -> Result<(), ValidationError> {
    let out = parse_amount(&quote.out_amount)
        .ok_or_else(|| ValidationError::route(ValidationReason::UnparsableAmount))?;
    let min = parse_amount(&quote.min_received)
        .ok_or_else(|| ValidationError::route(ValidationReason::UnparsableAmount))?;
    if min > out {
        return Err(ValidationError::route(ValidationReason::MinReceivedExceedsOut));
    }
    validate_route(&quote.best_route, request)
}
