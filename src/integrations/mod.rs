//! Build integrations
//!
//! Integrations are listed under `integrations` in `folio.yml`. Each one
//! consumes the part of the configuration it cares about and runs once the
//! collections have been loaded and exported.

mod robots;
mod sitemap;

use anyhow::Result;
use std::path::Path;

use crate::config::{IntegrationKind, SiteConfig};
use crate::content::Collections;

pub use robots::Robots;
pub use sitemap::Sitemap;

/// Everything an integration can see at the end of a build
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
    pub collections: &'a Collections,
    pub public_dir: &'a Path,
}

/// A component hooked into the build
pub trait Integration: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs after content has been loaded and exported
    fn on_build_done(&self, ctx: &BuildContext<'_>) -> Result<()>;
}

/// Instantiate the integrations that have build-time work, in config order.
///
/// `mdx` only changes which files the collections accept and `vue` only
/// concerns the page layer, so neither has a build hook.
pub fn from_config(config: &SiteConfig) -> Vec<Box<dyn Integration>> {
    let mut integrations: Vec<Box<dyn Integration>> = Vec::new();

    for kind in &config.integrations {
        match kind {
            IntegrationKind::Sitemap => integrations.push(Box::new(Sitemap)),
            IntegrationKind::Robots => integrations.push(Box::new(Robots {
                sitemap: config.has_integration(IntegrationKind::Sitemap),
            })),
            IntegrationKind::Mdx | IntegrationKind::Vue => {
                tracing::debug!("Integration {} has no build hook", kind.name());
            }
        }
    }

    integrations
}

/// Run every integration, stopping at the first failure
pub fn run_all(integrations: &[Box<dyn Integration>], ctx: &BuildContext<'_>) -> Result<()> {
    for integration in integrations {
        tracing::debug!("Running integration {}", integration.name());
        integration.on_build_done(ctx)?;
    }
    Ok(())
}
