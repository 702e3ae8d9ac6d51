//! Validate content and report invalid documents

use anyhow::Result;
use std::fmt::Write;

use crate::config::InvalidContentPolicy;
use crate::content::{CollectionName, Collections};
use crate::Folio;

/// Validate every collection and print a report. Returns whether all content is valid.
pub fn run(folio: &Folio) -> Result<bool> {
    let collections = folio.load_collections()?;
    print!("{}", format_report(&collections));
    Ok(collections.is_valid())
}

/// Human-readable summary of every collection and its invalid documents
pub fn format_report(collections: &Collections) -> String {
    let mut out = String::new();

    for name in CollectionName::ALL {
        let collection = collections.collection(name);
        let _ = writeln!(
            out,
            "{}: {} valid, {} invalid",
            name,
            collection.len(),
            collection.errors().len()
        );

        for err in collection.errors() {
            let _ = writeln!(out, "  {}/{}", name, err.path.display());
            if err.issues().is_empty() {
                let _ = writeln!(out, "    - {}", err.error);
            }
            for issue in err.issues() {
                let _ = writeln!(out, "    - {}", issue);
            }
        }
    }

    out
}

/// Log every invalid document at the level the policy implies
pub fn log_errors(collections: &Collections, policy: InvalidContentPolicy) {
    for err in collections.errors() {
        match policy {
            InvalidContentPolicy::Fail => tracing::error!("{}", err),
            InvalidContentPolicy::Warn => tracing::warn!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_format_report() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "blog/ok.md",
            "---\ntitle: Ok\ndescription: d\npubDate: 2024-01-01\n---\n",
        );
        write(dir.path(), "blog/bad.md", "---\ndescription: d\n---\n");
        write(
            dir.path(),
            "projects/link.md",
            "---\ntitle: L\ndescription: d\npubDate: 2024-01-01\nliveUrl: \"ftp:/bad\"\n---\n",
        );

        let collections = Collections::load(dir.path(), true).unwrap();
        let report = format_report(&collections);

        assert!(report.contains("blog: 1 valid, 1 invalid"));
        assert!(report.contains("  blog/bad.md"));
        assert!(report.contains("`title`: required field is missing"));
        assert!(report.contains("`pubDate`: required field is missing"));
        assert!(report.contains("projects: 0 valid, 1 invalid"));
        assert!(report.contains("`liveUrl`: invalid url `ftp:/bad`"));
    }
}
