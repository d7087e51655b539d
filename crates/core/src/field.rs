//! Field metadata: what we know about one target text-entry field.
//!
//! A [`FieldMeta`] bundles the label candidates found around an element
//! (priority-ordered, highest first) with the raw attribute signals the
//! classifier reads. It is built fresh for every interaction and discarded
//! after one synthesis pass.

use serde::{Deserialize, Serialize};

/// Where a label candidate came from. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// `<label for="id">` text
    LabelFor,
    /// Nearest ancestor `<label>` text
    LabelParent,
    AriaLabel,
    #[serde(rename = "aria-labelledby")]
    AriaLabelledBy,
    Placeholder,
    Title,
    Name,
    Id,
    /// First non-empty custom `data-*` label attribute
    Data,
    /// Heading/label/hint text near the element
    Nearby,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LabelFor => "label-for",
            Self::LabelParent => "label-parent",
            Self::AriaLabel => "aria-label",
            Self::AriaLabelledBy => "aria-labelledby",
            Self::Placeholder => "placeholder",
            Self::Title => "title",
            Self::Name => "name",
            Self::Id => "id",
            Self::Data => "data",
            Self::Nearby => "nearby",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cleaned, non-empty label candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSource {
    pub kind: SourceKind,
    pub text: String,
}

/// Raw attribute signals, copied verbatim from the element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSignals {
    #[serde(default)]
    pub input_type: String,
    #[serde(default)]
    pub autocomplete: String,
    #[serde(default)]
    pub input_mode: String,
    #[serde(default)]
    pub max_length: String,
    #[serde(default)]
    pub pattern: String,
}

impl FieldSignals {
    /// All signal values in declaration order.
    pub fn values(&self) -> [&str; 5] {
        [
            &self.input_type,
            &self.autocomplete,
            &self.input_mode,
            &self.max_length,
            &self.pattern,
        ]
    }
}

/// Inferred label candidates and raw signals for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    #[serde(default)]
    pub field_label: String,
    #[serde(default)]
    pub sources: Vec<LabelSource>,
    #[serde(default)]
    pub signals: FieldSignals,
}

impl FieldMeta {
    /// Build a meta from priority-ordered sources; `field_label` is the first source's text.
    pub fn from_sources(sources: Vec<LabelSource>, signals: FieldSignals) -> Self {
        let field_label = sources
            .first()
            .map(|source| source.text.clone())
            .unwrap_or_default();
        Self {
            field_label,
            sources,
            signals,
        }
    }

    /// A meta carrying only a bare label (used when the caller sent no sources).
    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            field_label: label.into(),
            ..Self::default()
        }
    }

    /// The first source of the given kind, if present.
    pub fn source(&self, kind: SourceKind) -> Option<&str> {
        self.sources
            .iter()
            .find(|source| source.kind == kind)
            .map(|source| source.text.as_str())
    }
}

/// Semantic purpose of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Email,
    Phone,
    Url,
    Address,
    Title,
    Summary,
    Tagline,
    Cta,
    Company,
    Role,
    Price,
    Date,
    Time,
    Description,
    Bio,
    Keywords,
    Tags,
    Slug,
    Unclassified,
}

/// Per-type generation guidance: the instruction line and the default hard limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldProfile {
    pub hint: &'static str,
    pub default_max_len: u32,
}

impl FieldType {
    /// Every classified tag.
    pub const ALL: [FieldType; 18] = [
        Self::Email,
        Self::Phone,
        Self::Url,
        Self::Address,
        Self::Title,
        Self::Summary,
        Self::Tagline,
        Self::Cta,
        Self::Company,
        Self::Role,
        Self::Price,
        Self::Date,
        Self::Time,
        Self::Description,
        Self::Bio,
        Self::Keywords,
        Self::Tags,
        Self::Slug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Address => "address",
            Self::Title => "title",
            Self::Summary => "summary",
            Self::Tagline => "tagline",
            Self::Cta => "cta",
            Self::Company => "company",
            Self::Role => "role",
            Self::Price => "price",
            Self::Date => "date",
            Self::Time => "time",
            Self::Description => "description",
            Self::Bio => "bio",
            Self::Keywords => "keywords",
            Self::Tags => "tags",
            Self::Slug => "slug",
            Self::Unclassified => "unclassified",
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, Self::Unclassified)
    }

    /// Hint line and default limit for this type; `None` when unclassified.
    pub fn profile(&self) -> Option<FieldProfile> {
        let (hint, default_max_len) = match self {
            Self::Title => ("- Field type: title. Provide a concise, descriptive title.", 70),
            Self::Summary => ("- Field type: summary. Provide 1-2 sentences.", 160),
            Self::Tagline => ("- Field type: tagline. Short and catchy.", 60),
            Self::Cta => ("- Field type: CTA. 2-6 words, action-oriented.", 40),
            Self::Address => ("- Field type: address. Provide a realistic full address.", 120),
            Self::Email => ("- Field type: email. Provide a realistic email address.", 64),
            Self::Phone => ("- Field type: phone. Provide a realistic phone number.", 32),
            Self::Url => ("- Field type: url. Provide a clean URL.", 80),
            Self::Company => ("- Field type: company name.", 80),
            Self::Role => ("- Field type: role or job title.", 80),
            Self::Price => ("- Field type: price. Include currency symbol.", 24),
            Self::Date => ("- Field type: date. Use a clear format.", 24),
            Self::Time => ("- Field type: time. Use a clear format.", 16),
            Self::Description => ("- Field type: description. 2-4 sentences.", 240),
            Self::Bio => ("- Field type: bio. Short paragraph.", 320),
            Self::Keywords => ("- Field type: keywords. 5-12 items, comma-separated.", 120),
            Self::Tags => ("- Field type: tags. 5-12 items, comma-separated.", 120),
            Self::Slug => ("- Field type: slug. Use kebab-case.", 80),
            Self::Unclassified => return None,
        };
        Some(FieldProfile {
            hint,
            default_max_len,
        })
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
