//! The rich-text dialect: sanitizing, list repair and empty detection.
//!
//! A rich-text value is a `String` of constrained HTML. The canonical form,
//! which is what gets persisted, is produced by [`canonicalize`].

pub(crate) mod dom;
pub mod empty;
pub mod lists;
pub mod sanitizer;

#[cfg(test)]
mod tests;

pub use empty::is_empty;
pub use lists::normalize;
pub use sanitizer::sanitize;

/// Repairs lists, sanitizes, and coerces semantically empty markup to `""`.
///
/// Lists are repaired again after sanitizing, since removing a dangerous
/// child can leave an item empty.
pub fn canonicalize(html: &str) -> String {
    let repaired = lists::normalize(html);
    let sanitized = lists::normalize(&sanitizer::sanitize(&repaired));

    if empty::is_empty(&sanitized) {
        String::new()
    } else {
        sanitized
    }
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub(crate) fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
