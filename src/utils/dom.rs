// src/utils/dom.rs

//! Small helpers over `scraper` documents.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Concatenated text of an element and all its descendants.
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of an element with `<br>` and `<div>` boundaries turned into newlines.
///
/// Judges that render samples line by line (one `div` per line, or `br`
/// separators) lose their line structure with plain [`text`].
pub fn text_with_breaks(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_text(child_el, out);
                }
                if el.name() == "div" && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// The text nodes that are direct children of `element`, in order.
pub fn direct_text_nodes(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(text.to_string()),
            _ => None,
        })
        .collect()
}

/// The next sibling that is an element, skipping text and comments.
pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Text of the first element matching `selector`.
pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(text)
}

/// Text of the last element matching `selector`.
pub fn last_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).last().map(text)
}
