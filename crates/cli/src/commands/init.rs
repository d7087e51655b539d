//! `fieldwise init`: First-time setup.

use fieldwise_config::Settings;
use fieldwise_store::FileStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = Settings::config_dir();
    let config_path = Settings::config_path();

    println!("Fieldwise — First-Time Setup");
    println!("============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
    } else {
        std::fs::write(&config_path, Settings::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Add an API key under [providers.<name>] or export OPENAI_API_KEY");
        println!("   2. Run: fieldwise projects add --name <NAME> --description <TEXT>");
        println!("   3. Run: fieldwise fill --project <NAME> --html page.html --selector '#field'\n");
    }

    println!("  Workspace file: {}", FileStore::default_path().display());

    Ok(())
}
