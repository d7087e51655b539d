//! Prompt template rendering.
//!
//! Tokens look like `{{fieldLabel}}`, with optional whitespace inside the
//! braces. A line mentioning a field token whose value is empty is dropped
//! entirely (matched case-insensitively); substitution itself is exact.
//! Unknown tokens are left as written.

use fieldwise_core::project::Project;

const FIELD_LABEL: &str = "fieldLabel";
const FIELD_PLACEHOLDER: &str = "fieldPlaceholder";
const FIELD_VALUE: &str = "fieldValue";

/// Find the next `{{ name }}` token at or after `from`.
///
/// Returns the token's byte range and its trimmed name.
fn next_token(text: &str, from: usize) -> Option<(usize, usize, &str)> {
    let mut cursor = from;
    while let Some(offset) = text[cursor..].find("{{") {
        let open = cursor + offset;
        let inner_start = open + 2;
        if let Some(close_offset) = text[inner_start..].find("}}") {
            let inner = &text[inner_start..inner_start + close_offset];
            let name = inner.trim();
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Some((open, inner_start + close_offset + 2, name));
            }
        }
        cursor = open + 1;
    }
    None
}

fn mentions_token(line: &str, token: &str) -> bool {
    let mut cursor = 0;
    while let Some((_, end, name)) = next_token(line, cursor) {
        if name.eq_ignore_ascii_case(token) {
            return true;
        }
        cursor = end;
    }
    false
}

fn drop_lines_mentioning(template: &str, tokens: &[&str]) -> String {
    if tokens.is_empty() {
        return template.to_string();
    }
    template
        .split_inclusive('\n')
        .filter(|line| !tokens.iter().any(|token| mentions_token(line, token)))
        .collect()
}

/// Replace known tokens; `lookup` returns `None` for names it does not know.
fn substitute<'a>(text: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some((start, end, name)) = next_token(text, cursor) {
        output.push_str(&text[cursor..start]);
        match lookup(name) {
            Some(value) => output.push_str(value),
            None => output.push_str(&text[start..end]),
        }
        cursor = end;
    }
    output.push_str(&text[cursor..]);
    output
}

/// Render a prompt template. Without a project there is nothing to say, so the result is empty.
pub fn render(
    template: &str,
    project: Option<&Project>,
    field_label: &str,
    field_placeholder: &str,
    field_value: &str,
    language: &str,
) -> String {
    let Some(project) = project else {
        return String::new();
    };

    let empty_fields: Vec<&str> = [
        (FIELD_LABEL, field_label),
        (FIELD_PLACEHOLDER, field_placeholder),
        (FIELD_VALUE, field_value),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(token, _)| token)
    .collect();

    let kept = drop_lines_mentioning(template, &empty_fields);
    let language = if language.trim().is_empty() {
        "English"
    } else {
        language
    };

    let rendered = substitute(&kept, |name| match name {
        "name" => Some(project.name.as_str()),
        "description" => Some(project.description.as_str()),
        FIELD_LABEL => Some(field_label),
        FIELD_PLACEHOLDER => Some(field_placeholder),
        FIELD_VALUE => Some(field_value),
        "language" => Some(language),
        _ => None,
    });

    rendered.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldwise_config::DEFAULT_TEMPLATE;

    fn project() -> Project {
        Project::new("Acme", "Rocket-powered roller skates")
    }

    #[test]
    fn no_project_renders_empty() {
        assert_eq!(render(DEFAULT_TEMPLATE, None, "Title", "", "", "English"), "");
    }

    #[test]
    fn empty_fields_drop_their_lines() {
        let project = project();
        let prompt = render(DEFAULT_TEMPLATE, Some(&project), "", "", "", "English");
        assert!(!prompt.contains("{{fieldLabel}}"));
        assert!(!prompt.contains("{{fieldPlaceholder}}"));
        assert!(!prompt.contains("{{fieldValue}}"));
        assert!(!prompt.contains("Field label:"));
        assert!(prompt.starts_with("Product description: Rocket-powered roller skates\n\nInstructions:"));
    }

    #[test]
    fn substitutes_every_known_token() {
        let project = project();
        let prompt = render(
            DEFAULT_TEMPLATE,
            Some(&project),
            "Headline",
            "Your headline",
            "Fast skates",
            "German",
        );
        assert!(prompt.contains("Field label: Headline\n"));
        assert!(prompt.contains("Field placeholder: Your headline, use"));
        assert!(prompt.contains("Current value: Fast skates,"));
        assert!(prompt.contains("- Language: German."));
        assert!(prompt.ends_with("- Hard limit: 200 characters."));
    }

    #[test]
    fn whitespace_inside_braces_and_unknown_tokens() {
        let project = project();
        let prompt = render(
            "{{ name }} / {{unknown}} / {{{description}}",
            Some(&project),
            "x",
            "",
            "",
            "",
        );
        assert_eq!(prompt, "Acme / {{unknown}} / {Rocket-powered roller skates");
    }

    #[test]
    fn line_removal_ignores_case_but_substitution_does_not() {
        let project = project();
        let template = "Keep {{name}}\nDrop {{ FIELDVALUE }}\nLabel {{FieldLabel}}";
        let prompt = render(template, Some(&project), "Title", "", "", "English");
        assert_eq!(prompt, "Keep Acme\nLabel {{FieldLabel}}");
    }

    #[test]
    fn blank_language_defaults_to_english() {
        let project = project();
        assert_eq!(
            render("{{language}}", Some(&project), "", "", "", "  "),
            "English"
        );
    }
}
