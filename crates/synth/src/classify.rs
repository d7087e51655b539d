//! Field classification: maps a [`FieldMeta`] to a [`FieldType`].
//!
//! Structured signals are checked first; when they say nothing, keyword
//! groups are matched against all label text in a fixed order, so the
//! first group that hits wins.

use fieldwise_core::field::{FieldMeta, FieldType};

/// Keyword groups in match order.
pub const KEYWORD_GROUPS: [(FieldType, &[&str]); 18] = [
    (FieldType::Email, &["email", "e-mail"]),
    (FieldType::Phone, &["phone", "tel", "mobile", "whatsapp"]),
    (FieldType::Url, &["website", "url", "link"]),
    (
        FieldType::Address,
        &["address", "street", "city", "state", "zip", "postal", "country"],
    ),
    (FieldType::Title, &["title", "headline"]),
    (FieldType::Summary, &["summary", "overview"]),
    (FieldType::Tagline, &["tagline", "slogan"]),
    (FieldType::Cta, &["cta", "call to action", "button"]),
    (FieldType::Description, &["description", "details"]),
    (FieldType::Bio, &["bio", "about"]),
    (FieldType::Keywords, &["keyword", "keywords"]),
    (FieldType::Tags, &["tag", "tags"]),
    (FieldType::Slug, &["slug", "permalink"]),
    (
        FieldType::Company,
        &["company", "organization", "organisation", "brand"],
    ),
    (FieldType::Role, &["role", "job title", "position"]),
    (FieldType::Price, &["price", "cost", "budget"]),
    (FieldType::Date, &["date", "dob", "birthday"]),
    (FieldType::Time, &["time"]),
];

fn from_signals(meta: &FieldMeta) -> Option<FieldType> {
    let input_type = meta.signals.input_type.trim().to_lowercase();
    let autocomplete = meta.signals.autocomplete.trim().to_lowercase();

    if input_type == "email" || autocomplete.contains("email") {
        return Some(FieldType::Email);
    }
    if input_type == "tel" || autocomplete.contains("tel") {
        return Some(FieldType::Phone);
    }
    if input_type == "url" || autocomplete.contains("url") {
        return Some(FieldType::Url);
    }
    if ["street", "address", "postal", "zip"]
        .iter()
        .any(|token| autocomplete.contains(token))
    {
        return Some(FieldType::Address);
    }
    None
}

/// Every piece of text the keyword rules look at, lower-cased and space-joined.
fn haystack(meta: &FieldMeta) -> String {
    std::iter::once(meta.field_label.as_str())
        .chain(meta.sources.iter().map(|source| source.text.as_str()))
        .chain(meta.signals.values())
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Classify a field. Total and deterministic.
pub fn classify(meta: &FieldMeta) -> FieldType {
    if let Some(field_type) = from_signals(meta) {
        return field_type;
    }

    let text = haystack(meta);
    if text.is_empty() {
        return FieldType::Unclassified;
    }

    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(field_type, _)| *field_type)
        .unwrap_or(FieldType::Unclassified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldwise_core::field::{FieldSignals, LabelSource, SourceKind};

    fn with_signals(input_type: &str, autocomplete: &str) -> FieldMeta {
        FieldMeta {
            signals: FieldSignals {
                input_type: input_type.into(),
                autocomplete: autocomplete.into(),
                ..FieldSignals::default()
            },
            ..FieldMeta::default()
        }
    }

    #[test]
    fn signals_take_precedence() {
        assert_eq!(classify(&with_signals("email", "")), FieldType::Email);
        assert_eq!(classify(&with_signals(" TEL ", "")), FieldType::Phone);
        assert_eq!(classify(&with_signals("url", "")), FieldType::Url);
        assert_eq!(classify(&with_signals("text", "street-address")), FieldType::Address);
        assert_eq!(classify(&with_signals("text", "postal-code")), FieldType::Address);

        let mut meta = with_signals("tel", "");
        meta.field_label = "Website".into();
        assert_eq!(classify(&meta), FieldType::Phone);
    }

    #[test]
    fn email_input_type_beats_a_phone_label() {
        let mut meta = with_signals("email", "");
        meta.field_label = "Phone".into();
        assert_eq!(classify(&meta), FieldType::Email);
    }

    #[test]
    fn keyword_order_breaks_ties() {
        // "title" matches before "role" and "company"
        assert_eq!(
            classify(&FieldMeta::from_label("Company job title")),
            FieldType::Title
        );
        // "e-mail" is checked before "address"
        assert_eq!(
            classify(&FieldMeta::from_label("E-mail address")),
            FieldType::Email
        );
        assert_eq!(
            classify(&FieldMeta::from_label("Call to action")),
            FieldType::Cta
        );
        assert_eq!(
            classify(&FieldMeta::from_label("Organisation")),
            FieldType::Company
        );
    }

    #[test]
    fn matches_substrings_in_every_source() {
        let meta = FieldMeta::from_sources(
            vec![
                LabelSource {
                    kind: SourceKind::Placeholder,
                    text: "Say something about yourself".into(),
                },
                LabelSource {
                    kind: SourceKind::Name,
                    text: "user_bio".into(),
                },
            ],
            FieldSignals::default(),
        );
        assert_eq!(classify(&meta), FieldType::Bio);
    }

    #[test]
    fn signal_values_feed_keywords() {
        let meta = FieldMeta {
            signals: FieldSignals {
                pattern: "[0-9]{2}:[0-9]{2} time".into(),
                ..FieldSignals::default()
            },
            ..FieldMeta::default()
        };
        assert_eq!(classify(&meta), FieldType::Time);
    }

    #[test]
    fn unknown_and_empty_are_unclassified() {
        assert_eq!(classify(&FieldMeta::default()), FieldType::Unclassified);
        assert_eq!(
            classify(&FieldMeta::from_label("Favourite colour")),
            FieldType::Unclassified
        );
    }

    #[test]
    fn every_type_is_reachable() {
        for (field_type, keywords) in KEYWORD_GROUPS {
            assert_eq!(classify(&FieldMeta::from_label(keywords[0])), field_type);
        }
    }
}
