//! Text helpers shared by grading and prompt rendering.

/// Normalizes free-text answers for comparison.
///
/// Lower-cases the input and drops every character that is not an ASCII
/// letter or digit, so `"Banal "`, `"banal"` and `"b-a-n-a-l"` compare equal.
/// Lower-casing runs first, so letters that fold to ASCII (`İ`, the Kelvin
/// sign) are kept; other non-ASCII letters are dropped.
#[must_use]
pub fn normalize_answer(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Returns true when both answers normalize to the same string.
#[must_use]
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
