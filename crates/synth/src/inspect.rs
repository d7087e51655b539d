//! Element inspection: the read-only view of a page element the collector needs.
//!
//! The label collector never touches a DOM directly; it asks an
//! [`ElementInspector`]. Two implementations ship here: [`FixtureElement`],
//! a serde-loadable synthetic element, and [`HtmlElement`], backed by a
//! parsed HTML document.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Containers that group a control with its caption.
pub const CONTAINER_SELECTOR: &str = "fieldset, .form-group, .field, .input-group, .form-field, [role='group'], [data-field], [data-form-field]";

/// Caption-like nodes searched inside the container.
pub const NEARBY_SELECTOR: &str = "label, legend, h1, h2, h3, h4, h5, h6, .label, .field-label, .input-label, .help-text, .hint, .description, small";

/// Capability set the label collector reads from.
pub trait ElementInspector {
    /// Raw attribute value, `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Text of the `<label for="...">` pointing at this element's id.
    fn label_for_text(&self) -> Option<String>;

    /// Text of the nearest enclosing `<label>`.
    fn ancestor_label_text(&self) -> Option<String>;

    /// Text content of the node with the given id anywhere in the document.
    fn text_by_id(&self, id: &str) -> Option<String>;

    /// Texts of caption-like nodes near the element, in document order.
    fn nearby_texts(&self) -> Vec<String>;

    /// Text of the previous element sibling.
    fn previous_sibling_text(&self) -> Option<String>;

    fn is_content_editable(&self) -> bool;

    /// Current value: text content for content-editable elements, the value otherwise.
    fn current_value(&self) -> String;
}

/// A synthetic element described as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixtureElement {
    pub attributes: BTreeMap<String, String>,
    pub label_for: Option<String>,
    pub ancestor_label: Option<String>,
    /// Other nodes in the document, by id (targets of `aria-labelledby`)
    pub nodes_by_id: BTreeMap<String, String>,
    pub nearby: Vec<String>,
    pub previous_sibling: Option<String>,
    pub content_editable: bool,
    pub value: String,
}

impl FixtureElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_node(mut self, id: &str, text: &str) -> Self {
        self.nodes_by_id.insert(id.into(), text.into());
        self
    }
}

impl ElementInspector for FixtureElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn label_for_text(&self) -> Option<String> {
        self.label_for.clone()
    }

    fn ancestor_label_text(&self) -> Option<String> {
        self.ancestor_label.clone()
    }

    fn text_by_id(&self, id: &str) -> Option<String> {
        self.nodes_by_id.get(id).cloned()
    }

    fn nearby_texts(&self) -> Vec<String> {
        self.nearby.clone()
    }

    fn previous_sibling_text(&self) -> Option<String> {
        self.previous_sibling.clone()
    }

    fn is_content_editable(&self) -> bool {
        self.content_editable
    }

    fn current_value(&self) -> String {
        self.value.clone()
    }
}

/// Errors raised while locating an element in a document.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No element matches '{0}'")]
    NotFound(String),
}

/// A parsed HTML document.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub(crate) fn html(&self) -> &Html {
        &self.html
    }

    /// The first element matching a CSS selector.
    pub fn select(&self, css: &str) -> Result<HtmlElement<'_>, InspectError> {
        let selector = Selector::parse(css).map_err(|e| InspectError::InvalidSelector {
            selector: css.into(),
            reason: e.to_string(),
        })?;
        self.html
            .select(&selector)
            .next()
            .map(|element| HtmlElement {
                document: &self.html,
                element,
            })
            .ok_or_else(|| InspectError::NotFound(css.into()))
    }
}

/// One element of a parsed [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct HtmlElement<'a> {
    document: &'a Html,
    element: ElementRef<'a>,
}

impl<'a> HtmlElement<'a> {
    /// Tag name, lower-cased.
    pub fn tag(&self) -> &str {
        self.element.value().name()
    }

    /// Whether text can be typed into this element.
    pub fn is_fillable(&self) -> bool {
        matches!(self.tag(), "input" | "textarea") || self.is_content_editable()
    }

    /// Self or the nearest ancestor matching `selector`.
    fn closest(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        std::iter::once(self.element)
            .chain(self.element.ancestors().filter_map(ElementRef::wrap))
            .find(|candidate| selector.matches(candidate))
    }

    pub(crate) fn node(&self) -> ElementRef<'a> {
        self.element
    }

    fn parent_element(&self) -> Option<ElementRef<'a>> {
        self.element.parent().and_then(ElementRef::wrap)
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

impl ElementInspector for HtmlElement<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }

    fn label_for_text(&self) -> Option<String> {
        let id = self.element.value().attr("id").filter(|id| !id.is_empty())?;
        let labels = Selector::parse("label[for]").ok()?;
        self.document
            .select(&labels)
            .find(|label| label.value().attr("for") == Some(id))
            .map(text_of)
    }

    fn ancestor_label_text(&self) -> Option<String> {
        let label = Selector::parse("label").ok()?;
        self.closest(&label).map(text_of)
    }

    fn text_by_id(&self, id: &str) -> Option<String> {
        let with_id = Selector::parse("[id]").ok()?;
        self.document
            .select(&with_id)
            .find(|node| node.value().attr("id") == Some(id))
            .map(text_of)
    }

    fn nearby_texts(&self) -> Vec<String> {
        let (Ok(containers), Ok(captions)) =
            (Selector::parse(CONTAINER_SELECTOR), Selector::parse(NEARBY_SELECTOR))
        else {
            return Vec::new();
        };
        let Some(container) = self
            .closest(&containers)
            .or_else(|| self.parent_element())
        else {
            return Vec::new();
        };
        container
            .select(&captions)
            .filter(|node| *node != self.element)
            .map(text_of)
            .collect()
    }

    fn previous_sibling_text(&self) -> Option<String> {
        self.element
            .prev_siblings()
            .find_map(ElementRef::wrap)
            .map(text_of)
    }

    fn is_content_editable(&self) -> bool {
        self.element
            .value()
            .attr("contenteditable")
            .is_some_and(|value| !value.eq_ignore_ascii_case("false"))
    }

    fn current_value(&self) -> String {
        if self.is_content_editable() || self.tag() == "textarea" {
            text_of(self.element)
        } else {
            self.attribute("value").unwrap_or_default()
        }
    }
}
