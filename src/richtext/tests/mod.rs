use crate::richtext::{canonicalize, escape_attribute, escape_text, is_empty, normalize, sanitize};

#[test]
fn test_canonicalize_empty_variants() {
    for html in ["", "<p></p>", "<br>", "&nbsp;", "<ul></ul>", "<p><br></p>"] {
        assert_eq!(canonicalize(html), "", "expected empty canonical for {html:?}");
    }
}

#[test]
fn test_canonicalize_repairs_and_sanitizes() {
    let html = r#"<ul>loose<script>alert(1)</script></ul><a href="https://x.test">x</a>"#;
    let canonical = canonicalize(html);

    assert!(!canonical.contains("script"));
    assert!(!canonical.contains("alert"));
    assert!(canonical.contains("<li>loose</li>"));
    assert!(canonical.contains(r#"target="_blank""#));
    assert!(canonical.contains(r#"rel="noopener noreferrer""#));
}

#[test]
fn test_canonicalize_is_stable() {
    let samples = [
        "<p>was responsible for <b>testing</b></p>",
        "<ul>text<b>x</b></ul>",
        r#"<div><a href="https://example.com" target="_top">site</a></div>"#,
        "Led development.<br>Mentored juniors.",
    ];
    for sample in samples {
        let once = canonicalize(sample);
        assert_eq!(canonicalize(&once), once);
    }
}

#[test]
fn test_canonicalize_wraps_orphan_items() {
    assert_eq!(canonicalize("<li>orphan</li>"), "<ul><li>orphan</li></ul>");
}

#[test]
fn test_canonicalize_fills_items_emptied_by_sanitizing() {
    assert_eq!(
        canonicalize("<p>Hi</p><ul><script>x</script></ul>"),
        "<p>Hi</p><ul><li>&nbsp;</li></ul>"
    );
    assert_eq!(canonicalize("<ul><li><script>x</script></li></ul>"), "");
}

#[test]
fn test_fused_tag_does_not_smuggle_script() {
    // `<a<script>` tokenizes as one unknown tag, leaving the body as text
    let clean = sanitize("<a<script>evil()</script>");
    assert!(!clean.contains("<script"));
    let fragment = crate::richtext::dom::parse_fragment(&clean);
    assert!(fragment.select_first("script").is_err());
}

#[test]
fn test_canonical_output_is_not_empty_for_text() {
    let canonical = canonicalize("<p>a</p>");
    assert_eq!(canonical, "<p>a</p>");
    assert!(!is_empty(&canonical));
}

#[test]
fn test_escape_helpers() {
    assert_eq!(escape_text("a < b & c\u{a0}"), "a &lt; b &amp; c&nbsp;");
    assert_eq!(escape_attribute(r#"x"y&z"#), "x&quot;y&amp;z");
}

#[test]
fn test_sanitize_then_normalize_commute_on_dialect() {
    let html = "<ul><li>a</li><li><b>b</b></li></ul>";
    assert_eq!(normalize(&sanitize(html)), sanitize(&normalize(html)));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    fn markup() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            Just("<p>".to_string()),
            Just("</p>".to_string()),
            Just("<ul>".to_string()),
            Just("</ul>".to_string()),
            Just("<li>".to_string()),
            Just("<b>".to_string()),
            Just("</b>".to_string()),
            Just("<br>".to_string()),
            Just("<script>evil()</script>".to_string()),
            Just("<style>p{}</style>".to_string()),
            Just("<iframe>frame</iframe>".to_string()),
            Just(r#"<a href="https://x.test" target="_self">"#.to_string()),
            Just("</a>".to_string()),
            Just("&nbsp;".to_string()),
            // no '<' here, so text never fuses with the following tag
            "[a-z &>]{0,8}",
        ];
        prop::collection::vec(piece, 0..16).prop_map(|pieces| pieces.concat())
    }

    proptest! {
        #[test]
        fn test_sanitize_never_panics(html in ".*") {
            let _ = sanitize(&html);
            let _ = normalize(&html);
            let _ = is_empty(&html);
        }

        #[test]
        fn test_sanitize_idempotent(html in markup()) {
            let once = sanitize(&html);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn test_sanitize_strips_dangerous_content(html in markup()) {
            let clean = sanitize(&html);
            let fragment = crate::richtext::dom::parse_fragment(&clean);
            prop_assert!(fragment.select_first("script, style, iframe, object, embed").is_err());
            prop_assert!(!clean.contains("evil()"));
            prop_assert!(!clean.contains("p{}"));
        }

        #[test]
        fn test_normalized_lists_only_hold_items(html in markup()) {
            let normalized = normalize(&html);
            let fragment = crate::richtext::dom::parse_fragment(&normalized);
            if let Ok(lists) = fragment.select("ul, ol") {
                for list in lists {
                    for child in list.as_node().children() {
                        let is_item = crate::richtext::dom::is_element(&child, "li");
                        let is_blank = child.as_text().is_some_and(|t| t.borrow().trim().is_empty());
                        prop_assert!(is_item || is_blank || child.as_comment().is_some());
                    }
                }
            }
        }
    }
}
