//! Fieldwise CLI: the main entry point.
//!
//! Commands:
//! - `init`: Create the config file and workspace
//! - `config`: Show, locate, validate or change settings
//! - `providers`: List providers and their credentials
//! - `validate-key`: Check an API key against its provider
//! - `projects`: Manage project contexts
//! - `recent`: Show recently filled field labels
//! - `inspect`: Show what Fieldwise infers about a field
//! - `fill`: Generate text for one field
//! - `pick`: Interactive session over an HTML page

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "fieldwise",
    about = "Fieldwise — project-aware text for any form field",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config file and workspace
    Init,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List supported providers and which ones have credentials
    Providers,

    /// Check an API key against its provider
    ValidateKey {
        /// Provider to check (defaults to the resolved provider)
        #[arg(short, long)]
        provider: Option<String>,

        /// Key to check (defaults to the configured key)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Show recently filled field labels
    Recent,

    /// Show the label sources, signals and type inferred for a field
    Inspect {
        /// HTML file containing the field
        #[arg(long)]
        html: PathBuf,

        /// CSS selector of the field
        #[arg(short, long)]
        selector: String,
    },

    /// Generate text for one field
    Fill {
        /// Project name or id
        #[arg(short, long)]
        project: Option<String>,

        /// HTML file containing the field
        #[arg(long, requires = "selector", conflicts_with = "request")]
        html: Option<PathBuf>,

        /// CSS selector of the field
        #[arg(short, long, requires = "html")]
        selector: Option<String>,

        /// JSON file holding a complete fill request
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Print prompt, request, response and token usage
        #[arg(long)]
        debug: bool,

        /// Only synthesize the prompt; do not call a provider
        #[arg(long)]
        dry_run: bool,
    },

    /// Interactive picking session over an HTML page
    Pick {
        /// Project name or id
        #[arg(short, long)]
        project: String,

        /// HTML file to pick fields from
        #[arg(long)]
        html: PathBuf,

        /// Write the page with generated text filled in
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings with keys masked
    Show,
    /// Print the config file path
    Path,
    /// Validate the settings
    Validate,
    /// Change the description limit tier (small, medium, large)
    Tier { tier: String },
}

#[derive(Subcommand)]
enum ProjectsAction {
    /// List projects
    List,
    /// Add a project
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: String,
    },
    /// Edit a project's name or description
    Edit {
        /// Project name or id
        project: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove a project
    Remove {
        /// Project name or id
        project: String,
    },
    /// Move a project up or down the list
    Move {
        /// Project name or id
        project: String,
        #[arg(long, conflicts_with = "down")]
        up: bool,
        #[arg(long)]
        down: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Tier { tier } => commands::config_cmd::set_tier(&tier).await?,
        },
        Commands::Providers => commands::providers::run().await?,
        Commands::ValidateKey { provider, key } => {
            commands::providers::validate(provider, key).await?
        }
        Commands::Projects { action } => match action {
            ProjectsAction::List => commands::projects::list().await?,
            ProjectsAction::Add { name, description } => {
                commands::projects::add(&name, &description).await?
            }
            ProjectsAction::Edit {
                project,
                name,
                description,
            } => commands::projects::edit(&project, name, description).await?,
            ProjectsAction::Remove { project } => commands::projects::remove(&project).await?,
            ProjectsAction::Move { project, up, down } => {
                let direction = match (up, down) {
                    (true, _) => -1,
                    (_, true) => 1,
                    _ => return Err("Pass --up or --down".into()),
                };
                commands::projects::move_by(&project, direction).await?
            }
        },
        Commands::Recent => commands::recent::run().await?,
        Commands::Inspect { html, selector } => commands::inspect::run(&html, &selector).await?,
        Commands::Fill {
            project,
            html,
            selector,
            request,
            debug,
            dry_run,
        } => {
            let source = match (request, html, selector) {
                (Some(path), _, _) => commands::fill::Source::Request(path),
                (None, Some(html), Some(selector)) => commands::fill::Source::Html { html, selector },
                _ => return Err("Pass --request FILE, or --html FILE with --selector CSS".into()),
            };
            commands::fill::run(source, project, debug, dry_run).await?
        }
        Commands::Pick { project, html, out } => {
            commands::pick::run(&project, &html, out.as_deref()).await?
        }
    }

    Ok(())
}
