//! Create a new blog post or project

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;

use crate::content::CollectionName;
use crate::Folio;

/// Create a content file with the required front-matter filled in
pub fn create_entry(folio: &Folio, collection: &str, title: &str) -> Result<PathBuf> {
    let name: CollectionName = collection.parse()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let target_dir = folio.content_dir.join(name.base_dir());
    fs::create_dir_all(&target_dir)?;

    let slug = slug::slugify(title);
    let slug = if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    };
    let file_path = target_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = scaffold(name, title, &today)?;
    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created {:?}", file_path);
    Ok(file_path)
}

/// Front-matter block and an empty body for a new entry
fn scaffold(name: CollectionName, title: &str, date: &str) -> Result<String> {
    let mut fields = Mapping::new();
    fields.insert("title".into(), title.into());
    fields.insert("description".into(), "".into());
    fields.insert("pubDate".into(), date.into());

    match name {
        CollectionName::Blog => {
            fields.insert("tags".into(), Value::Sequence(Vec::new()));
            fields.insert("draft".into(), true.into());
        }
        CollectionName::Projects => {
            fields.insert("technologies".into(), Value::Sequence(Vec::new()));
        }
    }

    let yaml = serde_yaml::to_string(&fields)?;
    Ok(format!("---\n{}---\n\n", yaml))
}
