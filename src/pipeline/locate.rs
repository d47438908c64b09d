use crate::error::ExtractError;

/// Find where the JSON structure begins and return the suffix from there.
///
/// Between the first `{` and the first `[`, the earlier index wins
/// regardless of bracket type, since a JSON value can legally start with
/// either.
/// The choice is textual, not semantic: a bracket inside leading prose can
/// in rare cases shadow the real root. That edge is accepted rather than
/// guessed around.
pub fn locate(cleaned: &str) -> Result<&str, ExtractError> {
    let start = match (cleaned.find('{'), cleaned.find('[')) {
        (Some(obj), Some(arr)) => obj.min(arr),
        (Some(obj), None) => obj,
        (None, Some(arr)) => arr,
        (None, None) => return Err(ExtractError::NoJsonFound),
    };
    Ok(&cleaned[start..])
}
