//! Writing generated text back into a parsed page.
//!
//! The document is serialized again with every filled field carrying its new
//! text: the `value` attribute for inputs, the text content for textareas and
//! content-editable elements.

use scraper::{ElementRef, Node};

use crate::inspect::{HtmlDocument, InspectError};

/// Elements that never take a closing tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text is written verbatim.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

type Targets<'a> = Vec<(ElementRef<'a>, &'a str)>;

/// Render `document` as HTML with every `(selector, text)` fill applied.
///
/// When two fills resolve to the same element the later one wins.
pub fn render_filled(
    document: &HtmlDocument,
    fills: &[(String, String)],
) -> Result<String, InspectError> {
    let mut targets: Targets<'_> = Vec::new();
    for (selector, text) in fills {
        let element = document.select(selector)?.node();
        targets.retain(|(existing, _)| *existing != element);
        targets.push((element, text.as_str()));
    }

    let mut out = String::new();
    for child in document.html().tree.root().children() {
        match ElementRef::wrap(child) {
            Some(element) => write_element(element, &targets, &mut out),
            None => write_leaf(child.value(), false, &mut out),
        }
    }
    Ok(out)
}

fn write_element(element: ElementRef<'_>, targets: &Targets<'_>, out: &mut String) {
    let name = element.value().name();
    let fill = targets
        .iter()
        .find(|(target, _)| *target == element)
        .map(|(_, text)| *text);

    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        if fill.is_some() && name == "input" && attr == "value" {
            continue;
        }
        write_attr(attr, value, out);
    }
    if let (Some(text), "input") = (fill, name) {
        write_attr("value", text, out);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    match fill {
        Some(text) => escape_text(text, out),
        None => {
            let raw = RAW_TEXT_ELEMENTS.contains(&name);
            for child in element.children() {
                match ElementRef::wrap(child) {
                    Some(nested) => write_element(nested, targets, out),
                    None => write_leaf(child.value(), raw, out),
                }
            }
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_leaf(node: &Node, raw: bool, out: &mut String) {
    match node {
        Node::Doctype(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype.name());
            out.push('>');
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Text(text) if raw => out.push_str(text),
        Node::Text(text) => escape_text(text, out),
        _ => {}
    }
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
