//! Best-effort rewrite of almost-JSON into strict JSON.
//!
//! Handles the mistakes small models make most often: single-quoted
//! strings, unquoted keys, `//` and `/* */` comments, trailing commas, and
//! an unterminated tail. The rewrite is purely syntactic: it only ever
//! adds the quotes and closers needed to finish what the text already
//! started, never values.

/// Run the tolerant transform over `input` and return the rewritten text.
/// The result is not guaranteed to parse; the caller treats a parse failure
/// as "try the next strategy".
pub fn repair(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut stack: Vec<char> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => i = copy_string(&chars, i, c, &mut out),
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() {
                    if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            '{' | '[' => {
                stack.push(c);
                out.push(c);
                i += 1;
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                stack.pop();
                out.push(c);
                i += 1;
            }
            c if is_ident_start(c) => i = copy_ident(&chars, i, &mut out),
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    // Unterminated tail: close whatever is still open, trimming the
    // separator that would otherwise dangle before the closer.
    while let Some(open) = stack.pop() {
        drop_trailing_comma(&mut out);
        out.push(if open == '{' { '}' } else { ']' });
    }
    out
}

/// Copy a string literal, normalizing to double quotes. Returns the index
/// just past the closing quote (or `chars.len()` if the string ran off the
/// end, in which case the output is closed anyway).
fn copy_string(chars: &[char], start: usize, quote: char, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                match chars.get(i + 1) {
                    // \' inside a single-quoted string is just an apostrophe.
                    Some('\'') if quote == '\'' => out.push('\''),
                    Some(&next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => {} // dangling backslash at EOF
                }
                i += 2;
            }
            c if c == quote => {
                out.push('"');
                return i + 1;
            }
            // A bare double quote inside a single-quoted string needs escaping.
            '"' => {
                out.push_str("\\\"");
                i += 1;
            }
            // Raw control characters are not legal inside JSON strings.
            '\n' => {
                out.push_str("\\n");
                i += 1;
            }
            '\r' => {
                out.push_str("\\r");
                i += 1;
            }
            '\t' => {
                out.push_str("\\t");
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out.push('"');
    chars.len()
}

/// Copy a bare word. If the next non-whitespace char is `:` it was meant as
/// a key and gets quoted; otherwise it passes through untouched (`true`,
/// `false` and `null` stay valid, anything else is left for the later
/// strategies to deal with).
fn copy_ident(chars: &[char], start: usize, out: &mut String) -> usize {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }

    let mut j = end;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }

    let word: String = chars[start..end].iter().collect();
    if chars.get(j) == Some(&':') {
        out.push('"');
        out.push_str(&word);
        out.push('"');
    } else {
        out.push_str(&word);
    }
    end
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Remove one comma sitting (possibly behind whitespace) at the end of the
/// output buffer, keeping the whitespace.
fn drop_trailing_comma(out: &mut String) {
    let content_len = out.trim_end().len();
    if out[..content_len].ends_with(',') {
        let tail = out.split_off(content_len);
        out.pop();
        out.push_str(&tail);
    }
}
