//! Configuration module

mod site;

use std::path::PathBuf;
use thiserror::Error;

pub use site::HighlightConfig;
pub use site::IntegrationKind;
pub use site::InvalidContentPolicy;
pub use site::MarkdownConfig;
pub use site::OutputMode;
pub use site::SiteConfig;
pub use site::ViteConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse `{0}`")]
    Yaml(PathBuf, #[source] serde_yaml::Error),

    #[error("invalid site origin `{0}`: {1}")]
    InvalidSite(String, String),

    #[error("unknown collection `{0}` (available: blog, projects)")]
    UnknownCollection(String),
}
