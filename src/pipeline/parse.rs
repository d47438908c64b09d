use serde_json::Value;

use crate::error::{ExtractError, preview};
use crate::pipeline::repair::repair;

/// Which parse strategy produced the value. Ordered from most to least
/// preferred; the cascade tries them strictly in this order and the first
/// success wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Tolerant repair transform, then parse. The primary path.
    Repair,
    /// The candidate was already valid as-is (covers the rare case where
    /// the repair transform mangles semantically meaningful content).
    Direct,
    /// Longest parseable prefix: recovers a valid leading structure from
    /// trailing garbage. Never fabricates, only shortens from the end.
    Truncate,
}

/// A successfully parsed candidate plus the strategy that produced it.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    pub value: Value,
    pub strategy: Strategy,
}

type Attempt = fn(&str) -> Option<Value>;

/// The fallback order is a first-class table so tests can pin it down.
const STRATEGIES: [(Strategy, Attempt); 3] = [
    (Strategy::Repair, try_repair),
    (Strategy::Direct, try_direct),
    (Strategy::Truncate, try_truncate),
];

/// Run the candidate through the strategy cascade.
///
/// Exhaustion fails with [`ExtractError::JsonExtractionFailed`] carrying a
/// bounded preview of the candidate.
pub fn parse(candidate: &str) -> Result<ExtractOutcome, ExtractError> {
    for (strategy, attempt) in STRATEGIES {
        if let Some(value) = attempt(candidate) {
            tracing::debug!(?strategy, len = candidate.len(), "parse strategy succeeded");
            return Ok(ExtractOutcome { value, strategy });
        }
    }
    tracing::debug!(len = candidate.len(), "all parse strategies exhausted");
    Err(ExtractError::JsonExtractionFailed {
        preview: preview(candidate),
    })
}

fn try_repair(candidate: &str) -> Option<Value> {
    serde_json::from_str(&repair(candidate)).ok()
}

fn try_direct(candidate: &str) -> Option<Value> {
    serde_json::from_str(candidate).ok()
}

/// Walk prefixes from the full length down to zero, longest first: trailing
/// garbage is the common failure, and the longest valid prefix is the one
/// we want when several parse. Total: the loop always reaches the empty
/// prefix and gives up.
fn try_truncate(candidate: &str) -> Option<Value> {
    for end in (0..=candidate.len()).rev() {
        if !candidate.is_char_boundary(end) {
            continue;
        }
        if let Ok(value) = serde_json::from_str(&candidate[..end]) {
            return Some(value);
        }
    }
    None
}
