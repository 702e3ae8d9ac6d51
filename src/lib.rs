//! folio: a static personal site builder
//!
//! Content lives in two collections, `blog` and `projects`, each a directory
//! of Markdown/MDX files whose front-matter is validated against a typed
//! schema. Valid entries are exported for page generation; invalid ones are
//! reported with the file and field that failed.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod integrations;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Name of the build configuration file in the site root
pub const CONFIG_FILE: &str = "folio.yml";

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Build configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root holding one directory per collection
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `folio.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Load and validate every collection from scratch
    pub fn load_collections(&self) -> Result<content::Collections> {
        let mdx = self
            .config
            .has_integration(config::IntegrationKind::Mdx);
        content::Collections::load(&self.content_dir, mdx)
            .with_context(|| format!("Failed to load collections from {:?}", self.content_dir))
    }

    /// Build the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Validate content without writing output. Returns whether all content is valid.
    pub fn check(&self) -> Result<bool> {
        commands::check::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Scaffold a new entry in a collection
    pub fn new_entry(&self, collection: &str, title: &str) -> Result<PathBuf> {
        commands::new::create_entry(self, collection, title)
    }
}
