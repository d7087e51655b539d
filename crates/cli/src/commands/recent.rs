//! `fieldwise recent`: Recently filled field labels.

use fieldwise_core::store::WorkspaceStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store();
    let recent = store.recent_fields().await?;

    if recent.is_empty() {
        println!("No fields filled yet.");
        return Ok(());
    }

    println!("Recent fields (most recent first):");
    for (i, label) in recent.as_slice().iter().enumerate() {
        println!("  {:>2}. {label}", i + 1);
    }

    Ok(())
}
