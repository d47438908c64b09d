use thiserror::Error;

// ─── Extraction error surface ────────────────────────────────────────────────

/// Everything that can go wrong between "prompt sent" and "structured value
/// returned".
///
/// Transport failures pass through as [`ExtractError::Http`] unmodified so
/// callers can tell "model unreachable" apart from "model replied with
/// garbage". All other variants describe what the pipeline found (or failed
/// to find) in the model's text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The model returned nothing (or only whitespace) to work with.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The cleaned response contains no `{` or `[` anywhere: pure prose
    /// where structured output was required.
    #[error("no JSON object or array found in model output")]
    NoJsonFound,

    /// A structural opening token was found but no parse strategy succeeded.
    /// Carries a bounded preview of the candidate, never the full string.
    #[error("could not parse JSON from model output: {preview}")]
    JsonExtractionFailed { preview: String },

    /// The extracted JSON parsed fine but does not match the shape the
    /// caller asked for.
    #[error("extracted JSON does not match the expected shape: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("config: {0}")]
    Config(String),

    /// Transport / HTTP errors from the model endpoint, as-is.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Upper bound on the diagnostic preview embedded in
/// [`ExtractError::JsonExtractionFailed`].
pub(crate) const PREVIEW_LIMIT: usize = 2000;

/// Truncate `candidate` to at most [`PREVIEW_LIMIT`] bytes on a char
/// boundary, marking the cut with an ellipsis.
pub(crate) fn preview(candidate: &str) -> String {
    if candidate.len() <= PREVIEW_LIMIT {
        return candidate.to_string();
    }
    let mut end = PREVIEW_LIMIT;
    while !candidate.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &candidate[..end])
}
