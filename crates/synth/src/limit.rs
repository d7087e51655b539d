//! Character-limit resolution and enforcement.
//!
//! The limit comes from a matching preset, else from the field type's default.
//! Enforcement rewrites the first "Hard limit: N characters." line in place,
//! or appends one, so applying the same limit twice changes nothing.

use fieldwise_config::Settings;
use fieldwise_core::field::FieldType;

const HARD_LIMIT: &str = "hard limit:";
const CHARACTERS: &str = "characters.";

/// The hard limit for a field: preset first, then the type default.
pub fn resolve_limit(settings: &Settings, field_label: &str, field_type: FieldType) -> Option<u32> {
    settings
        .preset_for(field_label)
        .and_then(|preset| preset.limit())
        .or_else(|| field_type.profile().map(|profile| profile.default_max_len))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Byte range of the digits in a hard-limit line, if `line` is one.
fn limit_digits(line: &str) -> Option<(usize, usize)> {
    let rest = line.trim_start();
    let rest = rest.strip_prefix('-').unwrap_or(rest).trim_start();
    let rest = strip_prefix_ignore_case(rest, HARD_LIMIT)?.trim_start();

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let after = rest[digits_len..].trim_start();
    strip_prefix_ignore_case(after, CHARACTERS)?;

    let start = line.len() - rest.len();
    Some((start, start + digits_len))
}

/// Make the prompt state `limit` as its hard limit.
pub fn apply_limit(prompt: &str, limit: Option<u32>) -> String {
    let Some(limit) = limit else {
        return prompt.to_string();
    };
    if prompt.is_empty() {
        return String::new();
    }

    let mut offset = 0;
    for line in prompt.split_inclusive('\n') {
        if let Some((start, end)) = limit_digits(line) {
            let mut output = String::with_capacity(prompt.len());
            output.push_str(&prompt[..offset + start]);
            output.push_str(&limit.to_string());
            output.push_str(&prompt[offset + end..]);
            return output;
        }
        offset += line.len();
    }

    format!("{prompt}\n- Hard limit: {limit} characters.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldwise_config::FieldPreset;

    fn settings_with_preset(label: &str, max_len: f64) -> Settings {
        Settings {
            field_presets: vec![FieldPreset {
                label: label.into(),
                max_len,
            }],
            ..Settings::default()
        }
    }

    #[test]
    fn preset_overrides_type_default() {
        let settings = settings_with_preset("Bio", 45.0);
        assert_eq!(resolve_limit(&settings, " bio ", FieldType::Bio), Some(45));
        assert_eq!(resolve_limit(&settings, "About", FieldType::Bio), Some(320));
    }

    #[test]
    fn unusable_preset_falls_through() {
        for max_len in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let settings = settings_with_preset("Bio", max_len);
            assert_eq!(resolve_limit(&settings, "Bio", FieldType::Bio), Some(320));
        }
    }

    #[test]
    fn unclassified_without_preset_has_no_limit() {
        assert_eq!(
            resolve_limit(&Settings::default(), "Colour", FieldType::Unclassified),
            None
        );
        let settings = settings_with_preset("Colour", 12.0);
        assert_eq!(
            resolve_limit(&settings, "colour", FieldType::Unclassified),
            Some(12)
        );
    }

    #[test]
    fn rewrites_only_the_first_limit_line() {
        let prompt = "Intro\n- Hard limit: 200 characters.\n- hard LIMIT: 10 characters.";
        assert_eq!(
            apply_limit(prompt, Some(64)),
            "Intro\n- Hard limit: 64 characters.\n- hard LIMIT: 10 characters."
        );
    }

    #[test]
    fn tolerant_of_spacing_and_missing_dash() {
        assert_eq!(
            apply_limit("Hard limit:300   characters. Really.", Some(80)),
            "Hard limit:80   characters. Really."
        );
        assert_eq!(
            apply_limit("x\n  -  Hard limit: 7 characters.", Some(9)),
            "x\n  -  Hard limit: 9 characters."
        );
    }

    #[test]
    fn appends_when_absent() {
        assert_eq!(
            apply_limit("Write a title", Some(70)),
            "Write a title\n- Hard limit: 70 characters."
        );
        // Not a limit line: "Hard limit" is not at the line start
        assert_eq!(
            apply_limit("Note Hard limit: 5 characters.", Some(70)),
            "Note Hard limit: 5 characters.\n- Hard limit: 70 characters."
        );
    }

    #[test]
    fn no_limit_or_empty_prompt_is_unchanged() {
        assert_eq!(apply_limit("Prompt", None), "Prompt");
        assert_eq!(apply_limit("", Some(10)), "");
    }

    #[test]
    fn applying_twice_is_idempotent() {
        for prompt in [
            "plain",
            "a\n- Hard limit: 200 characters.",
            "Hard limit: 1 characters.\nHard limit: 2 characters.",
            "line\n",
        ] {
            let once = apply_limit(prompt, Some(80));
            assert_eq!(apply_limit(&once, Some(80)), once);
        }
    }
}
