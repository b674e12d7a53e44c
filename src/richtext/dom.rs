use html5ever::{LocalName, Namespace, QualName};
use kuchiki::traits::*;
use kuchiki::{Attribute, ExpandedName, NodeRef};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub(crate) fn html_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(local))
}

/// Parses `html` the way a detached `<div>` parses its `innerHTML`.
///
/// The returned node is the fragment root; its children are the parsed nodes.
pub(crate) fn parse_fragment(html: &str) -> NodeRef {
    let document = kuchiki::parse_fragment(html_name("div"), Vec::new()).one(html);

    // Fragment parsing places every node under a synthetic <html> element
    match document.first_child() {
        Some(root) => root,
        None => document,
    }
}

/// Serializes the children of `node`, excluding the node itself.
pub(crate) fn inner_html(node: &NodeRef) -> String {
    node.children().map(|child| child.to_string()).collect()
}

pub(crate) fn new_element(local: &str) -> NodeRef {
    NodeRef::new_element(
        html_name(local),
        Vec::<(ExpandedName, Attribute)>::new(),
    )
}

pub(crate) fn is_element(node: &NodeRef, local: &str) -> bool {
    node.as_element()
        .is_some_and(|element| &*element.name.local == local)
}
