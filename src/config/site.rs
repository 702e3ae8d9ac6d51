//! Build configuration (folio.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::ConfigError;

/// Main build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin, used for absolute URLs in the sitemap and robots.txt
    pub site: String,
    pub output: OutputMode,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    /// What to do with documents that fail schema validation
    pub on_invalid: InvalidContentPolicy,

    #[serde(default)]
    pub vite: ViteConfig,
    pub integrations: Vec<IntegrationKind>,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: "https://alexvig.dev".to_string(),
            output: OutputMode::Static,

            content_dir: "src/content".to_string(),
            public_dir: "dist".to_string(),

            on_invalid: InvalidContentPolicy::Fail,

            vite: ViteConfig::default(),
            integrations: vec![
                IntegrationKind::Mdx,
                IntegrationKind::Vue,
                IntegrationKind::Sitemap,
                IntegrationKind::Robots,
            ],
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Yaml(path.to_path_buf(), e))?;
        config.validate()?;
        tracing::debug!("Loaded build config from {:?}", path);
        Ok(config)
    }

    /// Check the values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = url::Url::parse(&self.site)
            .map_err(|e| ConfigError::InvalidSite(self.site.clone(), e.to_string()))?;

        if !matches!(origin.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidSite(
                self.site.clone(),
                format!("unsupported scheme `{}`", origin.scheme()),
            ));
        }
        if origin.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidSite(
                self.site.clone(),
                "missing host".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether an integration is enabled
    pub fn has_integration(&self, kind: IntegrationKind) -> bool {
        self.integrations.contains(&kind)
    }

    /// Site origin without a trailing slash
    pub fn origin(&self) -> &str {
        self.site.trim_end_matches('/')
    }
}

/// Output mode. Only fully pre-rendered output is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Static,
}

/// Build policy for documents that fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidContentPolicy {
    /// Report every invalid document, then abort the build
    Fail,
    /// Report every invalid document and build without them
    Warn,
}

/// Integrations that can be listed under `integrations`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    Mdx,
    Vue,
    Sitemap,
    Robots,
}

impl IntegrationKind {
    pub fn name(&self) -> &'static str {
        match self {
            IntegrationKind::Mdx => "mdx",
            IntegrationKind::Vue => "vue",
            IntegrationKind::Sitemap => "sitemap",
            IntegrationKind::Robots => "robots",
        }
    }
}

/// Build-time transform plugins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViteConfig {
    pub plugins: Vec<String>,
}

impl Default for ViteConfig {
    fn default() -> Self {
        Self {
            plugins: vec!["tailwindcss".to_string()],
        }
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    #[serde(rename = "shikiConfig")]
    pub shiki_config: HighlightConfig,
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    /// Soft-wrap long lines instead of scrolling
    pub wrap: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "github-dark".to_string(),
            wrap: true,
        }
    }
}
