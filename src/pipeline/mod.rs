//! The text-to-value pipeline: cleanup → locate → repair/parse.
//!
//! Every function here is pure and synchronous; the async edges (model
//! invocation, retry delays) live in [`crate::extract`] and
//! [`crate::retry`]. Stages run strictly in order; each later strategy is
//! more expensive or more lossy, so early success short-circuits.

pub mod cleanup;
pub mod locate;
pub mod parse;
pub mod repair;

pub use parse::{ExtractOutcome, Strategy};

use serde_json::Value;

use crate::error::ExtractError;

/// Full raw-text-to-value path for callers that already hold the model's
/// output: clean, locate, then run the strategy cascade.
pub fn extract_value(raw: &str) -> Result<Value, ExtractError> {
    Ok(extract_outcome(raw)?.value)
}

/// Like [`extract_value`] but also reports which strategy fired.
pub fn extract_outcome(raw: &str) -> Result<ExtractOutcome, ExtractError> {
    let cleaned = cleanup::clean(raw)?;
    let candidate = locate::locate(cleanup::strip_leading_chatter(&cleaned))?;
    parse::parse(candidate)
}

/// Plain-text surface: the cleaned string itself, fences stripped, no JSON
/// requirement.
pub fn extract_text(raw: &str) -> Result<String, ExtractError> {
    cleanup::clean(raw)
}
