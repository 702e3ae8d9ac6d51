//! End-to-end builds against a temporary site

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use folio::config::{InvalidContentPolicy, SiteConfig};
use folio::content::IssueKind;
use folio::Folio;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site_with_content(dir: &Path) {
    write(
        dir,
        "src/content/blog/hello.md",
        "---\ntitle: Hello\ndescription: World\npubDate: 2024-01-01\n---\n\nFirst post.\n",
    );
    write(
        dir,
        "src/content/blog/2024/untitled.md",
        "---\ndescription: No title here\npubDate: 2024-02-02\n---\n",
    );
    write(
        dir,
        "src/content/projects/folio.mdx",
        "---\ntitle: Folio\ndescription: This site\npubDate: 2024-03-03\nliveUrl: https://proj.dev\ntechnologies: [rust]\n---\n",
    );
    write(
        dir,
        "src/content/projects/broken-link.md",
        "---\ntitle: Broken\ndescription: Bad link\npubDate: 2024-03-03\nliveUrl: \"ftp:/bad\"\n---\n",
    );
}

#[test]
fn test_default_blog_record() {
    let dir = tempfile::tempdir().unwrap();
    site_with_content(dir.path());

    let site = Folio::new(dir.path()).unwrap();
    let collections = site.load_collections().unwrap();

    let hello = collections.blog.get("hello.md").unwrap();
    assert_eq!(hello.data.title, "Hello");
    assert_eq!(hello.data.description, "World");
    assert_eq!(
        hello.data.pub_date,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(hello.data.author, "Alex Vig");
    assert!(hello.data.tags.is_empty());
    assert!(!hello.data.draft);
    assert!(!hello.data.featured);

    // The missing-title sibling is excluded without affecting `hello.md`
    assert_eq!(collections.blog.len(), 1);
    let err = &collections.blog.errors[0];
    assert_eq!(err.path, Path::new("2024/untitled.md"));
    assert_eq!(err.issue("title"), Some(&IssueKind::MissingRequiredField));

    let err = &collections.projects.errors[0];
    assert_eq!(err.path, Path::new("broken-link.md"));
    assert!(matches!(
        err.issue("liveUrl"),
        Some(IssueKind::InvalidUrlFormat { .. })
    ));
    assert_eq!(
        collections
            .projects
            .get("folio.mdx")
            .unwrap()
            .data
            .live_url
            .as_deref(),
        Some("https://proj.dev")
    );
}

#[test]
fn test_build_fails_on_invalid_content_by_default() {
    let dir = tempfile::tempdir().unwrap();
    site_with_content(dir.path());

    let site = Folio::new(dir.path()).unwrap();
    let err = site.build().unwrap_err();
    assert!(err.to_string().contains("2 invalid document(s)"));
    assert!(!site.public_dir.join("sitemap.xml").exists());
}

#[test]
fn test_build_with_warn_policy() {
    let dir = tempfile::tempdir().unwrap();
    site_with_content(dir.path());
    write(dir.path(), "folio.yml", "site: https://example.com\non_invalid: warn\n");

    let site = Folio::new(dir.path()).unwrap();
    assert_eq!(site.config.on_invalid, InvalidContentPolicy::Warn);
    site.build().unwrap();

    let public = dir.path().join("dist");
    let blog: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(public.join("_content/blog.json")).unwrap())
            .unwrap();
    assert_eq!(blog.as_object().unwrap().len(), 1);
    assert_eq!(blog["hello.md"]["data"]["pubDate"], "2024-01-01T00:00:00Z");

    let projects: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(public.join("_content/projects.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(projects["folio.mdx"]["data"]["technologies"][0], "rust");

    let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://example.com/blog/hello/</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/projects/folio/</loc>"));
    assert!(!sitemap.contains("untitled"));

    let robots = fs::read_to_string(public.join("robots.txt")).unwrap();
    assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));

    site.clean().unwrap();
    assert!(!public.exists());
}

#[test]
fn test_check_reports_validity() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/content/blog/ok.md",
        "---\ntitle: Ok\ndescription: d\npubDate: 2024-01-01\n---\n",
    );

    let site = Folio::new(dir.path()).unwrap();
    assert!(site.check().unwrap());

    write(dir.path(), "src/content/blog/bad.md", "---\ntitle: Bad\n---\n");
    assert!(!site.check().unwrap());
}

#[test]
fn test_integrations_follow_config() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/content/blog/a.mdx",
        "---\ntitle: A\ndescription: d\npubDate: 2024-01-01\n---\n",
    );

    let mut config = SiteConfig::default();
    config.integrations.clear();
    let site = Folio::with_config(dir.path().to_path_buf(), config);
    site.build().unwrap();

    let public = dir.path().join("dist");
    assert!(public.join("_content/blog.json").exists());
    assert!(!public.join("sitemap.xml").exists());
    assert!(!public.join("robots.txt").exists());

    // Without the mdx integration the .mdx post is not part of the collection
    let collections = site.load_collections().unwrap();
    assert!(collections.blog.is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "folio.yml", "site: not-a-url\n");
    assert!(Folio::new(dir.path()).is_err());

    write(dir.path(), "folio.yml", "integrations: [mdx, astro-icon]\n");
    assert!(Folio::new(dir.path()).is_err());
}
