use crate::error::ExtractError;

/// Strip the presentation artifacts a model commonly wraps around its
/// output: triple-backtick fences (with or without a language tag) and
/// surrounding whitespace.
///
/// This is also the plain-text result surface: callers that want prose
/// rather than JSON get exactly this string. Idempotent: the output
/// contains no fences, so a second pass is a no-op.
pub fn clean(raw: &str) -> Result<String, ExtractError> {
    if raw.trim().is_empty() {
        return Err(ExtractError::EmptyResponse);
    }
    Ok(strip_fences(raw).trim().to_string())
}

/// Drop any leading run of characters before the first `{`, `[` or `(`.
///
/// `(` counts because models sometimes open with parenthetical chatter;
/// the locator still scans for a real bracket afterwards. Text with no
/// such token passes through untouched.
pub fn strip_leading_chatter(cleaned: &str) -> &str {
    match cleaned.find(['{', '[', '(']) {
        Some(start) => &cleaned[start..],
        None => cleaned,
    }
}

fn strip_fences(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        // Swallow a language tag glued to the fence ("```json").
        let tag_len = rest
            .bytes()
            .take_while(u8::is_ascii_alphanumeric)
            .count();
        rest = &rest[tag_len..];
    }
    out.push_str(rest);
    out
}
