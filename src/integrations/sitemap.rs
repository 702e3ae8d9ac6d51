//! Sitemap generation.
//!
//! Writes `sitemap.xml` listing the index pages, every published post and
//! every project, with absolute URLs built from the configured `site`.

use anyhow::{Context, Result};
use std::fs;

use super::{BuildContext, Integration};
use crate::config::SiteConfig;
use crate::content::{CollectionName, Collections};
use crate::helpers::{date_ymd, entry_path, full_url_for};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Sitemap integration
pub struct Sitemap;

impl Integration for Sitemap {
    fn name(&self) -> &'static str {
        "sitemap"
    }

    fn on_build_done(&self, ctx: &BuildContext<'_>) -> Result<()> {
        let xml = into_xml(collect_urls(ctx.config, ctx.collections));
        let path = ctx.public_dir.join(SITEMAP_FILE);

        fs::write(&path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        tracing::info!("Generated {}", SITEMAP_FILE);
        Ok(())
    }
}

/// Single URL entry in the sitemap
#[derive(Debug, PartialEq)]
struct UrlEntry {
    loc: String,
    /// YYYY-MM-DD
    lastmod: Option<String>,
}

fn collect_urls(config: &SiteConfig, collections: &Collections) -> Vec<UrlEntry> {
    let mut urls: Vec<UrlEntry> = ["/", "/blog/", "/projects/"]
        .into_iter()
        .map(|path| UrlEntry {
            loc: full_url_for(config, path),
            lastmod: None,
        })
        .collect();

    for post in collections.published_posts() {
        urls.push(UrlEntry {
            loc: full_url_for(config, &entry_path(CollectionName::Blog, &post.id)),
            lastmod: Some(date_ymd(&post.data.last_modified())),
        });
    }

    for project in collections.sorted_projects() {
        urls.push(UrlEntry {
            loc: full_url_for(config, &entry_path(CollectionName::Projects, &project.id)),
            lastmod: Some(date_ymd(&project.data.pub_date)),
        });
    }

    urls
}

fn into_xml(urls: Vec<UrlEntry>) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_sitemap_lists_published_entries() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "blog/hello.md",
            "---\ntitle: Hello\ndescription: d\npubDate: 2024-01-01\nupdatedDate: 2024-02-01\n---\n",
        );
        write(
            dir.path(),
            "blog/draft.md",
            "---\ntitle: Draft\ndescription: d\npubDate: 2024-01-01\ndraft: true\n---\n",
        );
        write(
            dir.path(),
            "projects/folio.md",
            "---\ntitle: Folio\ndescription: d\npubDate: 2023-05-05\n---\n",
        );

        let collections = Collections::load(dir.path(), true).unwrap();
        let config = SiteConfig::default();
        let urls = collect_urls(&config, &collections);

        let locs: Vec<_> = urls.iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://alexvig.dev/",
                "https://alexvig.dev/blog/",
                "https://alexvig.dev/projects/",
                "https://alexvig.dev/blog/hello/",
                "https://alexvig.dev/projects/folio/",
            ]
        );
        assert_eq!(urls[3].lastmod.as_deref(), Some("2024-02-01"));
        assert_eq!(urls[4].lastmod.as_deref(), Some("2023-05-05"));
    }

    #[test]
    fn test_into_xml() {
        let xml = into_xml(vec![UrlEntry {
            loc: "https://example.com/?a=1&b=2".to_string(),
            lastmod: Some("2024-01-01".to_string()),
        }]);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(SITEMAP_NS));
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01</lastmod>"));
    }
}
