//! `fieldwise fill`: Generate text for one field.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fieldwise_core::fill::{FillRequest, FillResponse};
use fieldwise_core::provider::format_usage;
use fieldwise_synth::{FillService, HtmlDocument, capture, synthesize};

use super::{load_settings, open_store, require_project};

/// Where the field comes from.
pub enum Source {
    /// A JSON file holding a complete fill request.
    Request(PathBuf),
    /// A field picked out of an HTML page.
    Html { html: PathBuf, selector: String },
}

fn read_request(path: &Path) -> Result<FillRequest, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let request = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid fill request in {}: {e}", path.display()))?;
    Ok(request)
}

fn request_from_html(
    html: &Path,
    selector: &str,
) -> Result<FillRequest, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(html)
        .map_err(|e| format!("Failed to read {}: {e}", html.display()))?;
    let document = HtmlDocument::parse(&source);
    let capture = capture(&document.select(selector)?);

    Ok(FillRequest {
        field_label: capture.meta.field_label.clone(),
        field_meta: Some(capture.meta),
        field_value: capture.value,
        field_placeholder: capture.placeholder,
        ..FillRequest::default()
    })
}

fn print_debug(response: &FillResponse) -> Result<(), Box<dyn std::error::Error>> {
    if response.ok {
        let usage = response.usage.as_ref().and_then(Option::as_ref);
        eprintln!("{}", format_usage(usage));
    }
    eprintln!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

pub async fn run(
    source: Source,
    project: Option<String>,
    debug: bool,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    let store = open_store();

    let mut request = match &source {
        Source::Request(path) => read_request(path)?,
        Source::Html { html, selector } => request_from_html(html, selector)?,
    };
    if let Some(key) = project {
        request.project = Some(require_project(&store, &key).await?);
    }
    request.debug |= debug;
    let debug = request.debug;

    if dry_run {
        let plan = synthesize(&settings, &request);
        println!("Field type: {}", plan.field_type);
        match plan.limit {
            Some(limit) => println!("Limit:      {limit} characters"),
            None => println!("Limit:      none"),
        }
        println!();
        println!("{}", plan.prompt);
        return Ok(());
    }

    let service = FillService::from_settings(settings).with_store(Arc::new(store));
    let response = service.fill(request).await;

    if response.ok {
        println!("{}", response.text.as_deref().unwrap_or_default());
    }
    if debug {
        print_debug(&response)?;
    }

    if !response.ok {
        return Err(response.error.unwrap_or_else(|| "Fill failed".into()).into());
    }
    Ok(())
}
