//! Input sanitization for user-supplied contact form fields.

use regex::Regex;
use std::sync::LazyLock;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_MESSAGE_LEN: usize = 2000;
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile")
});

/// Escape the five HTML-significant characters to their entity equivalents.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Trim, truncate to `max_len` characters, then escape for HTML
/// interpolation.
pub fn sanitize_input(input: &str, max_len: usize) -> String {
    let truncated: String = input.trim().chars().take(max_len).collect();
    escape_html(&truncated)
}

/// Normalize an email address: trim, lowercase, cap at the RFC length limit.
///
/// Deliberately not HTML-escaped, matching the original handler. The value
/// still ends up inside HTML markup; see DESIGN.md for why this asymmetry
/// is kept.
pub fn sanitize_email(email: &str) -> String {
    email
        .trim()
        .to_lowercase()
        .chars()
        .take(MAX_EMAIL_LEN)
        .collect()
}

/// Simple local@domain-with-dot check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
