use std::collections::{HashMap, HashSet};

use ammonia::Builder;
use kuchiki::NodeRef;
use tracing::debug;

use crate::richtext::dom;

/// Tags a rich-text value may contain. Anything else is unwrapped.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "div", "span", "br", "b", "strong", "i", "em", "u", "s", "strike", "del", "ul", "ol",
    "li", "a", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "code", "mark",
];

/// Elements removed together with everything inside them.
pub const REMOVED_ELEMENTS: &[&str] = &["script", "iframe", "object", "embed", "style"];

const GENERIC_ATTRIBUTES: &[&str] = &["class", "id", "style"];
const LINK_ATTRIBUTES: &[&str] = &["href", "target", "rel"];

pub const LINK_TARGET: &str = "_blank";
pub const LINK_REL: &str = "noopener noreferrer";

/// Reduces arbitrary markup to the rich-text dialect.
///
/// Dangerous elements are dropped with their content, unknown tags are
/// unwrapped, and every anchor is forced to open in a new tab without an
/// opener reference. Never fails: the parser tolerates any input.
pub fn sanitize(raw_html: &str) -> String {
    if raw_html.is_empty() {
        return String::new();
    }

    // 1. Whitelist pass
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .clean_content_tags(REMOVED_ELEMENTS.iter().copied().collect())
        .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
        .tag_attributes(HashMap::from([(
            "a",
            LINK_ATTRIBUTES.iter().copied().collect::<HashSet<_>>(),
        )]))
        .link_rel(None);
    let cleaned = builder.clean(raw_html).to_string();

    // 2. Link attribute pass
    let fragment = dom::parse_fragment(&cleaned);
    let links = enforce_link_attributes(&fragment);

    let sanitized = dom::inner_html(&fragment);
    debug!(
        input_len = raw_html.len(),
        output_len = sanitized.len(),
        links,
        "sanitized rich text"
    );
    sanitized
}

fn enforce_link_attributes(root: &NodeRef) -> usize {
    let Ok(links) = root.select("a") else {
        return 0;
    };

    let mut count = 0;
    for link in links {
        let mut attributes = link.attributes.borrow_mut();
        attributes.insert("target", LINK_TARGET.to_string());
        attributes.insert("rel", LINK_REL.to_string());
        count += 1;
    }
    count
}
