//! robots.txt generation

use anyhow::{Context, Result};
use std::fs;

use super::sitemap::SITEMAP_FILE;
use super::{BuildContext, Integration};
use crate::config::SiteConfig;
use crate::helpers::full_url_for;

/// robots.txt integration
pub struct Robots {
    /// Point crawlers at the sitemap
    pub sitemap: bool,
}

impl Robots {
    fn render(&self, config: &SiteConfig) -> String {
        let mut out = String::from("User-agent: *\nAllow: /\n");
        if self.sitemap {
            out.push_str(&format!(
                "\nSitemap: {}\n",
                full_url_for(config, SITEMAP_FILE)
            ));
        }
        out
    }
}

impl Integration for Robots {
    fn name(&self) -> &'static str {
        "robots"
    }

    fn on_build_done(&self, ctx: &BuildContext<'_>) -> Result<()> {
        let path = ctx.public_dir.join("robots.txt");
        fs::write(&path, self.render(ctx.config))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Generated robots.txt");
        Ok(())
    }
}
