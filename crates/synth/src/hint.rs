//! Type-aware instruction injection.

use fieldwise_core::field::FieldType;

/// The hint goes right before the first line starting with this marker.
pub const INSTRUCTIONS_MARKER: &str = "\nInstructions:";

/// Insert the field type's hint line into a prompt.
///
/// Unclassified fields get no hint. Without an instructions block the hint is appended.
pub fn inject_hint(prompt: &str, field_type: FieldType) -> String {
    let Some(profile) = field_type.profile() else {
        return prompt.to_string();
    };

    match prompt.find(INSTRUCTIONS_MARKER) {
        Some(index) => format!("{}\n{}{}", &prompt[..index], profile.hint, &prompt[index..]),
        None => format!("{prompt}\n{}", profile.hint),
    }
}
