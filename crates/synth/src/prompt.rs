//! The synthesis pipeline: classify, render, inject the type hint, enforce the limit.

use fieldwise_config::Settings;
use fieldwise_core::field::FieldType;
use fieldwise_core::fill::FillRequest;

use crate::classify::classify;
use crate::hint::inject_hint;
use crate::limit::{apply_limit, resolve_limit};
use crate::template::render;

/// The outcome of prompt synthesis for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPlan {
    pub field_type: FieldType,
    pub limit: Option<u32>,
    /// Final prompt; empty when the request carried no project.
    pub prompt: String,
}

/// Build the generation prompt for a fill request.
pub fn synthesize(settings: &Settings, request: &FillRequest) -> PromptPlan {
    let field_type = classify(&request.meta());

    let rendered = render(
        settings.template(),
        request.project.as_ref(),
        &request.field_label,
        &request.field_placeholder,
        &request.field_value,
        settings.language(),
    );
    let hinted = inject_hint(&rendered, field_type);

    let limit = resolve_limit(settings, &request.field_label, field_type);
    let prompt = apply_limit(&hinted, limit);

    PromptPlan {
        field_type,
        limit,
        prompt,
    }
}
