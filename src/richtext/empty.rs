use regex::Regex;
use std::sync::LazyLock;

static NBSP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&nbsp;").expect("Failed to compile nbsp regex"));

static BR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Failed to compile br regex"));

static EMPTY_PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p></p>").expect("Failed to compile paragraph regex"));

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile tag regex"));

/// Returns true when `html` carries no visible text.
///
/// Non-breaking spaces, line breaks and empty paragraphs count as nothing.
pub fn is_empty(html: &str) -> bool {
    if html.is_empty() {
        return true;
    }

    let cleaned = NBSP_REGEX.replace_all(html, " ");
    let cleaned = BR_REGEX.replace_all(&cleaned, "");
    let cleaned = EMPTY_PARAGRAPH_REGEX.replace_all(&cleaned, "");
    let cleaned = TAG_REGEX.replace_all(&cleaned, "");

    // `trim` also strips U+00A0 left behind by a literal non-breaking space
    cleaned.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_markup_variants() {
        assert!(is_empty(""));
        assert!(is_empty("<p></p>"));
        assert!(is_empty("<br>"));
        assert!(is_empty("<BR/>"));
        assert!(is_empty("&nbsp;"));
        assert!(is_empty("<p><br></p>"));
        assert!(is_empty("<ul><li>&nbsp;</li></ul>"));
        assert!(is_empty("  \n "));
        assert!(is_empty("<p>\u{a0}</p>"));
    }

    #[test]
    fn test_non_empty_markup() {
        assert!(!is_empty("<p>a</p>"));
        assert!(!is_empty("plain"));
        assert!(!is_empty("<ul><li>item</li></ul>"));
        assert!(!is_empty("&amp;"));
    }
}
