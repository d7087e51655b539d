//! `fieldwise pick`: Interactive picking session over an HTML page.
//!
//! Each line read from stdin is a CSS selector standing in for a click on a
//! field. Generation runs in the background; a click that arrives while a
//! request is in flight is ignored, and answers to requests issued before a
//! restart are dropped. With `--out`, the page is written back with every
//! generated text in its field.

use std::path::Path;
use std::sync::Arc;

use fieldwise_core::fill::FillResponse;
use fieldwise_synth::{
    FillService, HtmlDocument, PickSession, RequestTicket, capture, render_filled,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::{load_settings, open_store, require_project};

const HELP: &str = "  Type a CSS selector to fill that field.\n  \
    `debug` toggles debug output, `restart` re-enters picking mode, `exit` leaves.";

fn print_response(response: &FillResponse, show_debug: bool) {
    if response.ok {
        println!("✍️  {}", response.text.as_deref().unwrap_or_default());
    } else {
        println!("❌ {}", response.error.as_deref().unwrap_or("Fill failed"));
    }

    if show_debug {
        if let Some(prompt) = &response.prompt {
            println!("\n--- prompt ---\n{prompt}\n--------------");
        }
        if response.ok {
            let usage = response.usage.as_ref().and_then(Option::as_ref);
            println!("[{}]", PickSession::usage_badge(usage));
        }
    }
}

pub async fn run(
    project_key: &str,
    html: &Path,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    let store = Arc::new(open_store());
    let project = require_project(store.as_ref(), project_key).await?;

    let source = std::fs::read_to_string(html)
        .map_err(|e| format!("Failed to read {}: {e}", html.display()))?;
    let document = HtmlDocument::parse(&source);

    let service = Arc::new(FillService::from_settings(settings).with_store(store));
    let (tx, mut rx) = mpsc::unbounded_channel::<(RequestTicket, String, FillResponse)>();
    let mut filled: Vec<(String, String)> = Vec::new();

    let mut session = PickSession::new();
    session.start(project.clone());

    println!("🎯 Picking fields in {} for '{}'", html.display(), project.name);
    println!("{HELP}");
    println!("[{}]", session.badge());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                match input {
                    "" => {}
                    "exit" | "quit" => break,
                    "help" => println!("{HELP}"),
                    "debug" => {
                        session.toggle_debug();
                        println!("[{}]", session.badge());
                    }
                    "restart" => {
                        session.stop();
                        session.start(project.clone());
                        println!("[{}]", session.badge());
                    }
                    selector => {
                        let element = match document.select(selector) {
                            Ok(element) => element,
                            Err(e) => {
                                println!("⚠️  {e}");
                                continue;
                            }
                        };
                        if !element.is_fillable() {
                            println!("⚠️  <{}> is not a text field", element.tag());
                            continue;
                        }
                        let Some(ticket) = session.begin_request() else {
                            println!("⏳ Still generating; click ignored");
                            continue;
                        };

                        let request = session.fill_request(capture(&element), &ticket);
                        println!("⏳ Generating for '{}'...", request.field_label);

                        let service = service.clone();
                        let tx = tx.clone();
                        let selector = selector.to_string();
                        tokio::spawn(async move {
                            let response = service.fill(request).await;
                            let _ = tx.send((ticket, selector, response));
                        });
                    }
                }
            }
            Some((ticket, selector, response)) = rx.recv() => {
                let show_debug = ticket.debug();
                if !session.finish_request(ticket) {
                    debug!("Dropping response from a previous session");
                    continue;
                }
                print_response(&response, show_debug);
                if let (true, Some(text)) = (response.ok, response.text) {
                    filled.push((selector, text));
                }
            }
        }
    }

    session.stop();

    if let Some(out) = out {
        let page = render_filled(&document, &filled)?;
        std::fs::write(out, page)
            .map_err(|e| format!("Failed to write {}: {e}", out.display()))?;
        println!("💾 Wrote {} filled field(s) to {}", filled.len(), out.display());
    }

    println!("👋 Picking stopped");
    Ok(())
}
