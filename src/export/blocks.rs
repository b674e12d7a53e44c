use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static LIST_MARKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:ul|li)\b").expect("Failed to compile list markup regex"));

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "ul", "ol", "li",
];

/// A unit of content handed to a document assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExportBlock {
    Heading {
        text: String,
        level: u8,
    },
    Paragraph {
        text: String,
        bold: bool,
    },
    ListItem {
        text: String,
        #[serde(rename = "indentLevel")]
        indent_level: usize,
    },
}

impl ExportBlock {
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        ExportBlock::Heading {
            text: text.into(),
            level,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        ExportBlock::Paragraph {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        ExportBlock::Paragraph {
            text: text.into(),
            bold: true,
        }
    }

    pub fn list_item(text: impl Into<String>, indent_level: usize) -> Self {
        ExportBlock::ListItem {
            text: text.into(),
            indent_level,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ExportBlock::Heading { text, .. }
            | ExportBlock::Paragraph { text, .. }
            | ExportBlock::ListItem { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Emit one paragraph per line instead of a single multi-line paragraph.
    pub preserve_lines: bool,
}

/// Converts canonical markup into export blocks.
pub fn extract_blocks(html: &str, options: ExtractOptions) -> Vec<ExportBlock> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();

    if LIST_MARKUP_REGEX.is_match(html) {
        let mut collector = ListCollector::default();
        collector.walk(root, 0);
        collector.flush();
        return collector.blocks;
    }

    let mut text = String::new();
    collect_text(root, &mut text, '\n');
    let lines: Vec<String> = text
        .lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        Vec::new()
    } else if options.preserve_lines {
        lines.into_iter().map(ExportBlock::paragraph).collect()
    } else {
        vec![ExportBlock::paragraph(lines.join("\n"))]
    }
}

/// Plain text of a fragment with whitespace collapsed to single spaces.
pub fn strip_tags(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(html);
    let mut text = String::new();
    collect_text(fragment.root_element(), &mut text, ' ');
    collapse_whitespace(&text)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef, out: &mut String, separator: char) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if name == "br" {
                out.push(separator);
                continue;
            }
            collect_text(child, out, separator);
            if BLOCK_TAGS.contains(&name) {
                out.push(separator);
            }
        }
    }
}

/// Text of a list item, leaving out any nested lists.
fn item_text(item: ElementRef) -> String {
    let mut text = String::new();
    own_text(item, &mut text);
    collapse_whitespace(&text)
}

fn own_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            match child.value().name() {
                "ul" | "ol" => {}
                "br" => out.push(' '),
                name => {
                    own_text(child, out);
                    if BLOCK_TAGS.contains(&name) {
                        out.push(' ');
                    }
                }
            }
        }
    }
}

#[derive(Default)]
struct ListCollector {
    blocks: Vec<ExportBlock>,
    paragraph: String,
}

impl ListCollector {
    fn walk(&mut self, element: ElementRef, depth: usize) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                self.paragraph.push_str(text);
                continue;
            }
            let Some(child) = ElementRef::wrap(child) else {
                continue;
            };

            match child.value().name() {
                "ul" | "ol" => {
                    self.flush();
                    self.walk_list(child, depth);
                }
                "li" => {
                    self.flush();
                    self.item(child, depth);
                }
                "br" => self.flush(),
                name if BLOCK_TAGS.contains(&name) => {
                    self.flush();
                    self.walk(child, depth);
                    self.flush();
                }
                _ => self.walk(child, depth),
            }
        }
    }

    fn walk_list(&mut self, list: ElementRef, depth: usize) {
        for child in list.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "ul" | "ol" => self.walk_list(child, depth + 1),
                _ => self.item(child, depth),
            }
        }
    }

    fn item(&mut self, item: ElementRef, depth: usize) {
        let text = item_text(item);
        if !text.is_empty() {
            self.blocks.push(ExportBlock::list_item(text, depth));
        }
        for nested in item.descendants().filter_map(ElementRef::wrap) {
            let name = nested.value().name();
            if (name == "ul" || name == "ol") && is_direct_list_of(nested, item) {
                self.walk_list(nested, depth + 1);
            }
        }
    }

    fn flush(&mut self) {
        let text = collapse_whitespace(&self.paragraph);
        self.paragraph.clear();
        if !text.is_empty() {
            self.blocks.push(ExportBlock::paragraph(text));
        }
    }
}

/// True when no other list sits between `list` and `item`.
fn is_direct_list_of(list: ElementRef, item: ElementRef) -> bool {
    let mut current = list.parent();
    while let Some(node) = current {
        if node.id() == item.id() {
            return true;
        }
        if let Some(element) = ElementRef::wrap(node)
            && matches!(element.value().name(), "ul" | "ol")
        {
            return false;
        }
        current = node.parent();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<ExportBlock> {
        extract_blocks(html, ExtractOptions::default())
    }

    #[test]
    fn test_list_items_in_order() {
        assert_eq!(
            extract("<ul><li>A</li><li>B</li></ul>"),
            vec![ExportBlock::list_item("A", 0), ExportBlock::list_item("B", 0)]
        );
    }

    #[test]
    fn test_paragraph_entities_decoded() {
        assert_eq!(
            extract("<p>Hello &amp; welcome</p>"),
            vec![ExportBlock::paragraph("Hello & welcome")]
        );
    }

    #[test]
    fn test_nested_lists_indent() {
        let blocks =
            extract("<ul><li>Top<ul><li>Inner <b>bold</b></li></ul></li><li>Next</li></ul>");
        assert_eq!(
            blocks,
            vec![
                ExportBlock::list_item("Top", 0),
                ExportBlock::list_item("Inner bold", 1),
                ExportBlock::list_item("Next", 0),
            ]
        );
    }

    #[test]
    fn test_blank_items_dropped() {
        assert_eq!(
            extract("<ul><li>&nbsp;</li><li> x </li></ul>"),
            vec![ExportBlock::list_item("x", 0)]
        );
    }

    #[test]
    fn test_mixed_content_keeps_order() {
        assert_eq!(
            extract("<p>Intro</p><ul><li>One</li></ul><p>Outro</p>"),
            vec![
                ExportBlock::paragraph("Intro"),
                ExportBlock::list_item("One", 0),
                ExportBlock::paragraph("Outro"),
            ]
        );
    }

    #[test]
    fn test_breaks_become_lines() {
        assert_eq!(
            extract("Led development.<br>Mentored&nbsp;juniors."),
            vec![ExportBlock::paragraph("Led development.\nMentored juniors.")]
        );
        assert_eq!(
            extract_blocks(
                "<p>One</p><p>Two</p>",
                ExtractOptions {
                    preserve_lines: true
                }
            ),
            vec![ExportBlock::paragraph("One"), ExportBlock::paragraph("Two")]
        );
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("<p><br></p>").is_empty());
        assert!(extract("   ").is_empty());
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>a <b>bold</b></p><p>b</p>"), "a bold b");
        assert_eq!(strip_tags("x&nbsp;&lt;y&gt;"), "x <y>");
    }

    #[test]
    fn test_block_serialization_shape() {
        let json = serde_json::to_value(ExportBlock::list_item("A", 2)).unwrap();
        assert_eq!(json["type"], "listItem");
        assert_eq!(json["indentLevel"], 2);

        let json = serde_json::to_value(ExportBlock::bold("T")).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["bold"], true);
    }
}
