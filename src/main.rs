//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::config::InvalidContentPolicy;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Static personal site builder with schema-validated content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate content and build the site
    #[command(alias = "b")]
    Build {
        /// Build without invalid documents instead of failing
        #[arg(long)]
        allow_invalid: bool,

        /// Rebuild when content or configuration changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Validate content and report invalid documents
    Check,

    /// Create a new blog post or project
    New {
        /// Collection to add to (blog, projects)
        collection: String,

        /// Title of the new entry
        title: String,
    },

    /// List site content
    List {
        /// Type of content to list (blog, projects, tags)
        #[arg(default_value = "blog")]
        r#type: String,
    },

    /// Remove the build output
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Build {
            allow_invalid,
            watch,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let policy = allow_invalid.then_some(InvalidContentPolicy::Warn);

            tracing::info!("Building site...");
            let result = folio::commands::build::run_with_policy(
                &site,
                policy.unwrap_or(site.config.on_invalid),
            );

            if watch {
                if let Err(e) = result {
                    tracing::error!("Build failed: {:#}", e);
                }
                folio::commands::build::watch(&site, policy)?;
            } else {
                result?;
                println!("Built successfully!");
            }
        }

        Commands::Check => {
            let site = folio::Folio::new(&base_dir)?;
            if !site.check()? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::New { collection, title } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new {} entry with title: {}", collection, title);
            let path = site.new_entry(&collection, &title)?;
            println!("Created: {:?}", path);
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(ExitCode::SUCCESS)
}
