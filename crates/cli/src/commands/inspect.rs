//! `fieldwise inspect`: Show what is inferred about one field of an HTML page.

use std::path::Path;

use fieldwise_synth::{HtmlDocument, capture, classify};

pub async fn run(html: &Path, selector: &str) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(html)
        .map_err(|e| format!("Failed to read {}: {e}", html.display()))?;
    let document = HtmlDocument::parse(&source);
    let element = document.select(selector)?;

    if !element.is_fillable() {
        println!(
            "⚠️  <{}> is not an input, textarea or contenteditable element",
            element.tag()
        );
    }

    let capture = capture(&element);
    let field_type = classify(&capture.meta);

    let label = match capture.meta.field_label.as_str() {
        "" => "(no label)",
        label => label,
    };
    println!("🔎 Field: {label}");
    println!("   Type:         {field_type}");
    if let Some(profile) = field_type.profile() {
        println!("   Default max:  {} chars", profile.default_max_len);
    }
    println!("   Value:        {:?}", capture.value);
    println!("   Placeholder:  {:?}", capture.placeholder);
    println!();
    println!("{}", serde_json::to_string_pretty(&capture.meta)?);

    Ok(())
}
