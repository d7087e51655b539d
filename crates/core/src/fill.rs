//! The request/response pair crossing the synthesis entry point.
//!
//! The picking surface sends a [`FillRequest`] for one clicked field and gets
//! back a [`FillResponse`]. Failures are tagged results (`ok: false`), never
//! panics or transport errors.

use serde::{Deserialize, Serialize};
use crate::field::FieldMeta;
use crate::project::Project;
use crate::provider::Usage;

/// A request to generate text for one field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillRequest {
    #[serde(default)]
    pub project: Option<Project>,

    #[serde(default)]
    pub field_label: String,

    #[serde(default)]
    pub field_meta: Option<FieldMeta>,

    #[serde(default)]
    pub field_value: String,

    #[serde(default)]
    pub field_placeholder: String,

    /// Attach prompt, request/response payloads and usage to the response.
    #[serde(default)]
    pub debug: bool,
}

impl FillRequest {
    /// The field meta to classify, falling back to a bare label.
    pub fn meta(&self) -> FieldMeta {
        self.field_meta
            .clone()
            .unwrap_or_else(|| FieldMeta::from_label(self.field_label.clone()))
    }
}

/// The outcome of one fill request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillResponse {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Final prompt (debug only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Credential-masked request payload (debug only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<serde_json::Value>,

    /// Raw provider response (debug only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,

    /// Token usage (debug only); `Some(None)` means the provider reported nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Option<Usage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FillResponse {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
