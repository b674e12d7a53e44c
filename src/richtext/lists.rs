use kuchiki::NodeRef;
use tracing::debug;

use crate::richtext::dom;

const NBSP: &str = "\u{a0}";

/// Repairs list structure so every `li` sits directly under a `ul`/`ol` and
/// every direct child of a list is an `li`.
///
/// Runs of items outside any list are wrapped in a new `ul`. Empty lists and
/// empty items receive a non-breaking space so the marker never renders
/// alone. Loose text and stray elements are each wrapped in their own item;
/// text content is otherwise left untouched.
pub fn normalize(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let fragment = dom::parse_fragment(html);
    let mut repaired = wrap_orphan_items(&fragment);

    let lists = select_all(&fragment, "ul, ol");
    for list in &lists {
        repaired += repair_list(list);
    }
    for item in select_all(&fragment, "li") {
        repaired += fill_empty_item(&item);
    }
    if repaired > 0 {
        debug!(lists = lists.len(), repaired, "repaired list structure");
    }

    dom::inner_html(&fragment)
}

fn select_all(fragment: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match fragment.select(selector) {
        Ok(selection) => selection.map(|node| node.as_node().clone()).collect(),
        Err(()) => Vec::new(),
    }
}

fn is_list(node: &NodeRef) -> bool {
    dom::is_element(node, "ul") || dom::is_element(node, "ol")
}

fn is_blank_text(node: &NodeRef) -> bool {
    node.as_text().is_some_and(|text| {
        text.borrow()
            .chars()
            .all(|ch| ch.is_whitespace() && ch != '\u{a0}')
    })
}

fn wrap_orphan_items(fragment: &NodeRef) -> usize {
    let mut wrapped = 0;
    for item in select_all(fragment, "li") {
        if item.parent().is_some_and(|parent| is_list(&parent)) {
            continue;
        }

        // the run ends at the last item; whitespace between items joins it
        let mut run = Vec::new();
        let mut next = Some(item.clone());
        while let Some(node) = next {
            if !dom::is_element(&node, "li") && !is_blank_text(&node) {
                break;
            }
            next = node.next_sibling();
            run.push(node);
        }
        while run.last().is_some_and(is_blank_text) {
            run.pop();
        }

        let list = dom::new_element("ul");
        item.insert_before(list.clone());
        for node in run {
            list.append(node);
        }
        wrapped += 1;
    }
    wrapped
}

fn fill_empty_item(item: &NodeRef) -> usize {
    let empty = item
        .children()
        .all(|child| is_blank_text(&child) || child.as_comment().is_some());
    if !empty {
        return 0;
    }
    for child in item.children().collect::<Vec<_>>() {
        child.detach();
    }
    item.append(NodeRef::new_text(NBSP));
    1
}

fn repair_list(list: &NodeRef) -> usize {
    let children: Vec<NodeRef> = list.children().collect();

    let has_content = children.iter().any(|child| {
        child.as_element().is_some()
            || child
                .as_text()
                .is_some_and(|text| !text.borrow().trim().is_empty())
    });

    if !has_content {
        for child in &children {
            child.detach();
        }
        let item = dom::new_element("li");
        item.append(NodeRef::new_text(NBSP));
        list.append(item);
        return 1;
    }

    let mut repaired = 0;
    for child in children {
        if let Some(text) = child.as_text() {
            let content = text.borrow().clone();
            if content.trim().is_empty() {
                continue;
            }
            let item = dom::new_element("li");
            child.insert_before(item.clone());
            child.detach();
            item.append(NodeRef::new_text(content));
            repaired += 1;
        } else if child.as_element().is_some() && !dom::is_element(&child, "li") {
            let item = dom::new_element("li");
            child.insert_before(item.clone());
            item.append(child);
            repaired += 1;
        }
    }
    repaired
}
