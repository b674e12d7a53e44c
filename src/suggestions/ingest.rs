use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::richtext::{escape_text, sanitize};
use crate::suggestions::catalog::Suggestions;

const BULLET: char = '•';

/// One suggestion as delivered by the suggestion source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SuggestionPayload {
    Text(String),
    SkillSet(Vec<String>),
}

impl SuggestionPayload {
    /// The string inserted into an editor when this suggestion is picked.
    pub fn insertable(&self) -> String {
        match self {
            SuggestionPayload::Text(text) => text.clone(),
            SuggestionPayload::SkillSet(skills) => skills.join(", "),
        }
    }
}

impl From<Suggestions> for Vec<SuggestionPayload> {
    fn from(suggestions: Suggestions) -> Self {
        match suggestions {
            Suggestions::Text(items) => items
                .iter()
                .map(|item| SuggestionPayload::Text(item.to_string()))
                .collect(),
            Suggestions::SkillSets(sets) => sets
                .iter()
                .map(|set| SuggestionPayload::SkillSet(set.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }
}

fn is_bulleted(line: &str) -> bool {
    line.trim_start().starts_with(BULLET)
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_prefix(BULLET).unwrap_or(trimmed).trim_start()
}

/// Converts suggestion text into sanitized markup.
///
/// Fully bulleted text becomes one list; partly bulleted text keeps its order
/// with each bullet as its own list and other lines as paragraphs; multi-line
/// text becomes paragraphs. A single line is returned as escaped inline text.
pub fn to_markup(text: &str) -> String {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }

    let bulleted = lines.iter().filter(|line| is_bulleted(line)).count();
    let mut markup = String::new();

    if bulleted == lines.len() {
        markup.push_str("<ul>");
        for line in &lines {
            markup.push_str(&format!("<li>{}</li>", escape_text(strip_bullet(line))));
        }
        markup.push_str("</ul>");
    } else if bulleted > 0 {
        for line in &lines {
            if is_bulleted(line) {
                markup.push_str(&format!("<ul><li>{}</li></ul>", escape_text(strip_bullet(line))));
            } else {
                markup.push_str(&format!("<p>{}</p>", escape_text(line.trim())));
            }
        }
    } else if text.contains('\n') {
        for line in &lines {
            markup.push_str(&format!("<p>{}</p>", escape_text(line.trim())));
        }
    } else {
        markup.push_str(&escape_text(text));
    }

    sanitize(&markup)
}

/// Appends skills to existing plain content with a `", "` separator.
pub fn append_skills(existing: &str, suggestion: &str) -> String {
    let existing = existing.trim().trim_end_matches(',').trim_end();
    let suggestion = suggestion.trim();

    match (existing.is_empty(), suggestion.is_empty()) {
        (true, _) => suggestion.to_string(),
        (false, true) => existing.to_string(),
        (false, false) => format!("{existing}, {suggestion}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_bullets_become_one_list() {
        assert_eq!(
            to_markup("• Did X\n• Did Y"),
            "<ul><li>Did X</li><li>Did Y</li></ul>"
        );
    }

    #[test]
    fn test_mixed_lines_keep_order() {
        assert_eq!(
            to_markup("Highlights\n• Did X\n\nThen more"),
            "<p>Highlights</p><ul><li>Did X</li></ul><p>Then more</p>"
        );
    }

    #[test]
    fn test_plain_lines_become_paragraphs() {
        assert_eq!(to_markup("Did X\nDid Y"), "<p>Did X</p><p>Did Y</p>");
    }

    #[test]
    fn test_single_line_is_inline() {
        assert_eq!(to_markup("Did X"), "Did X");
        assert_eq!(to_markup("R&D <lead>"), "R&amp;D &lt;lead&gt;");
        assert_eq!(to_markup("  \n "), "");
    }

    #[test]
    fn test_markup_in_suggestions_is_neutralized() {
        let markup = to_markup("• <script>alert(1)</script>\n• ok");
        assert!(!markup.contains("<script"));
        assert!(markup.contains("<li>ok</li>"));
    }

    #[test]
    fn test_append_skills() {
        assert_eq!(append_skills("Go", "Python, SQL"), "Go, Python, SQL");
        assert_eq!(append_skills("", "Python, SQL"), "Python, SQL");
        assert_eq!(append_skills("Go, ", "Rust"), "Go, Rust");
        assert_eq!(append_skills("Go", "  "), "Go");
    }

    #[test]
    fn test_payload_shapes() {
        let text: SuggestionPayload = serde_json::from_str(r#""Did X""#).unwrap();
        assert_eq!(text.insertable(), "Did X");

        let skills: SuggestionPayload = serde_json::from_str(r#"["Go","SQL"]"#).unwrap();
        assert_eq!(skills.insertable(), "Go, SQL");
        assert_eq!(serde_json::to_string(&skills).unwrap(), r#"["Go","SQL"]"#);
    }
}
