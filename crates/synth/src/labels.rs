//! Label source collection: every label candidate for an element, best first.

use fieldwise_core::field::{FieldMeta, FieldSignals, LabelSource, SourceKind};

use crate::inspect::ElementInspector;

/// Custom attributes that sites use to name a field, checked in order.
pub const DATA_LABEL_KEYS: [&str; 8] = [
    "data-label",
    "data-field-label",
    "data-title",
    "data-name",
    "data-placeholder",
    "data-testid",
    "data-qa",
    "data-test",
];

/// Nearby captions longer than this are paragraphs, not labels.
pub const MAX_NEARBY_LEN: usize = 160;

/// What the picking surface captures from a clicked field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCapture {
    pub meta: FieldMeta,
    pub value: String,
    pub placeholder: String,
}

/// Normalize raw label text.
///
/// Collapses whitespace, replaces asterisk runs with a space and strips a
/// trailing "required"/"optional" marker.
pub fn clean_label(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let unstarred = collapsed
        .split('*')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let unstarred = unstarred.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_marker(&unstarred).trim().to_string()
}

fn strip_marker(text: &str) -> &str {
    for marker in ["required", "optional"] {
        if text.len() >= marker.len() {
            let split = text.len() - marker.len();
            if text.is_char_boundary(split) && text[split..].eq_ignore_ascii_case(marker) {
                return text[..split].trim_end();
            }
        }
    }
    text
}

fn aria_labelledby_text(element: &dyn ElementInspector) -> String {
    let Some(ids) = element.attribute("aria-labelledby") else {
        return String::new();
    };
    ids.split_whitespace()
        .filter_map(|id| element.text_by_id(id))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn data_label(element: &dyn ElementInspector) -> String {
    DATA_LABEL_KEYS
        .iter()
        .filter_map(|key| element.attribute(key))
        .find(|value| !value.is_empty())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn nearby_label(element: &dyn ElementInspector) -> String {
    let fits = |text: &String| !text.is_empty() && text.chars().count() <= MAX_NEARBY_LEN;

    element
        .nearby_texts()
        .iter()
        .map(|text| clean_label(text))
        .find(fits)
        .or_else(|| {
            element
                .previous_sibling_text()
                .map(|text| clean_label(&text))
                .filter(fits)
        })
        .unwrap_or_default()
}

/// Gather every label candidate and signal for an element.
pub fn collect(element: &dyn ElementInspector) -> FieldMeta {
    let has_id = element
        .attribute("id")
        .is_some_and(|id| !id.is_empty());

    let candidates = [
        (
            SourceKind::LabelFor,
            has_id.then(|| element.label_for_text()).flatten(),
        ),
        (SourceKind::LabelParent, element.ancestor_label_text()),
        (SourceKind::AriaLabel, element.attribute("aria-label")),
        (SourceKind::AriaLabelledBy, Some(aria_labelledby_text(element))),
        (SourceKind::Placeholder, element.attribute("placeholder")),
        (SourceKind::Title, element.attribute("title")),
        (SourceKind::Name, element.attribute("name")),
        (SourceKind::Id, element.attribute("id")),
        (SourceKind::Data, Some(data_label(element))),
        (SourceKind::Nearby, Some(nearby_label(element))),
    ];

    let sources = candidates
        .into_iter()
        .filter_map(|(kind, raw)| {
            let text = clean_label(&raw?);
            (!text.is_empty()).then_some(LabelSource { kind, text })
        })
        .collect();

    let signal = |name: &str| element.attribute(name).unwrap_or_default();
    let signals = FieldSignals {
        input_type: signal("type"),
        autocomplete: signal("autocomplete"),
        input_mode: signal("inputmode"),
        max_length: signal("maxlength"),
        pattern: signal("pattern"),
    };

    FieldMeta::from_sources(sources, signals)
}

/// Collect the meta plus the current value and placeholder of an element.
pub fn capture(element: &dyn ElementInspector) -> FieldCapture {
    let placeholder = if element.is_content_editable() {
        String::new()
    } else {
        element
            .attribute("placeholder")
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    };

    FieldCapture {
        meta: collect(element),
        value: element.current_value().trim().to_string(),
        placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{FixtureElement, HtmlDocument};

    #[test]
    fn cleaning_rules() {
        assert_eq!(clean_label("  Full\n\tname  "), "Full name");
        assert_eq!(clean_label("Email *"), "Email");
        assert_eq!(clean_label("Email**address"), "Email address");
        assert_eq!(clean_label("Phone (optional)"), "Phone (optional)");
        assert_eq!(clean_label("Phone Optional"), "Phone");
        assert_eq!(clean_label("Company name * REQUIRED"), "Company name");
        assert_eq!(clean_label("***"), "");
    }

    #[test]
    fn sources_follow_priority_order() {
        let element = FixtureElement {
            label_for: Some("Headline".into()),
            ancestor_label: Some("Wrapper".into()),
            nearby: vec!["Landing page".into()],
            ..FixtureElement::new()
        }
        .with_attr("id", "hero_title")
        .with_attr("aria-label", "Hero")
        .with_attr("aria-labelledby", "a missing b")
        .with_attr("placeholder", "Your headline")
        .with_attr("title", "Main title")
        .with_attr("name", "hero")
        .with_attr("data-qa", "hero-input")
        .with_node("a", " First ")
        .with_node("b", "Second");

        let meta = collect(&element);
        let kinds: Vec<SourceKind> = meta.sources.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SourceKind::LabelFor,
                SourceKind::LabelParent,
                SourceKind::AriaLabel,
                SourceKind::AriaLabelledBy,
                SourceKind::Placeholder,
                SourceKind::Title,
                SourceKind::Name,
                SourceKind::Id,
                SourceKind::Data,
                SourceKind::Nearby,
            ]
        );
        assert_eq!(meta.field_label, "Headline");
        assert_eq!(meta.source(SourceKind::AriaLabelledBy), Some("First Second"));
        assert_eq!(meta.source(SourceKind::Data), Some("hero-input"));
    }

    #[test]
    fn label_for_needs_an_id() {
        let element = FixtureElement {
            label_for: Some("Orphan".into()),
            ..FixtureElement::new()
        }
        .with_attr("name", "email");
        let meta = collect(&element);
        assert_eq!(meta.field_label, "email");
        assert!(meta.source(SourceKind::LabelFor).is_none());
    }

    #[test]
    fn no_sources_means_empty_label() {
        let meta = collect(&FixtureElement::new());
        assert!(meta.sources.is_empty());
        assert_eq!(meta.field_label, "");
        assert_eq!(meta.signals, FieldSignals::default());
    }

    #[test]
    fn nearby_skips_long_text_and_falls_back_to_sibling() {
        let element = FixtureElement {
            nearby: vec!["x".repeat(MAX_NEARBY_LEN + 1), "   ".into()],
            previous_sibling: Some("Price *".into()),
            ..FixtureElement::new()
        };
        let meta = collect(&element);
        assert_eq!(meta.source(SourceKind::Nearby), Some("Price"));
    }

    #[test]
    fn signals_are_verbatim() {
        let element = FixtureElement::new()
            .with_attr("type", "EMAIL")
            .with_attr("autocomplete", "work email")
            .with_attr("maxlength", "64");
        let signals = collect(&element).signals;
        assert_eq!(signals.input_type, "EMAIL");
        assert_eq!(signals.autocomplete, "work email");
        assert_eq!(signals.max_length, "64");
        assert_eq!(signals.pattern, "");
    }

    #[test]
    fn capture_reads_value_and_placeholder() {
        let element = FixtureElement {
            value: "  hello ".into(),
            ..FixtureElement::new()
        }
        .with_attr("placeholder", " Say hi ");
        let captured = capture(&element);
        assert_eq!(captured.value, "hello");
        assert_eq!(captured.placeholder, "Say hi");

        let editable = FixtureElement {
            content_editable: true,
            ..FixtureElement::new()
        }
        .with_attr("placeholder", "ignored");
        assert_eq!(capture(&editable).placeholder, "");
    }

    #[test]
    fn collects_from_real_html() {
        let doc = HtmlDocument::parse(
            r#"<form>
                 <fieldset>
                   <legend>Contact details</legend>
                   <label for="mail">E-mail address <span>*</span></label>
                   <input id="mail" type="email" autocomplete="email">
                 </fieldset>
               </form>"#,
        );
        let input = doc.select("#mail").unwrap();
        let meta = collect(&input);
        assert_eq!(meta.field_label, "E-mail address");
        assert_eq!(meta.source(SourceKind::Id), Some("mail"));
        assert_eq!(meta.source(SourceKind::Nearby), Some("Contact details"));
        assert_eq!(meta.signals.autocomplete, "email");
    }
}
