//! Free-text sanitizing for values that end up rendered as HTML.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

/// Remove anything that looks like a markup tag.
pub fn strip_tags(input: &str) -> String {
    MARKUP.replace_all(input, "").into_owned()
}

/// Escape the five HTML-special characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip tags, then escape whatever special characters remain.
pub fn sanitize_text(input: &str) -> String {
    escape_html(&strip_tags(input))
}
