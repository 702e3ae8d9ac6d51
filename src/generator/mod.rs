//! Generator module - exports validated collections and runs integrations

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::content::{Collections, LoadedCollection, MarkdownRenderer};
use crate::integrations::{self, BuildContext, Integration};
use crate::Folio;

/// Directory under the public dir holding the collection data export
pub const DATA_DIR: &str = "_content";

/// Writes the build output for an already validated set of collections
pub struct Generator {
    folio: Folio,
    renderer: MarkdownRenderer,
    integrations: Vec<Box<dyn Integration>>,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = MarkdownRenderer::new(&folio.config.markdown.shiki_config)?;
        let integrations = integrations::from_config(&folio.config);

        Ok(Self {
            folio: folio.clone(),
            renderer,
            integrations,
        })
    }

    /// Generate the entire site output
    pub fn generate(&self, collections: &Collections) -> Result<()> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {}", public_dir.display()))?;

        let data_dir = public_dir.join(DATA_DIR);
        fs::create_dir_all(&data_dir)?;

        self.write_collection(&data_dir.join("blog.json"), &collections.blog)?;
        self.write_collection(&data_dir.join("projects.json"), &collections.projects)?;

        let ctx = BuildContext {
            config: &self.folio.config,
            collections,
            public_dir,
        };
        integrations::run_all(&self.integrations, &ctx)?;

        Ok(())
    }

    /// Write one collection as `{ path: { id, data, html } }`
    fn write_collection<T: Serialize + Sync>(
        &self,
        path: &Path,
        collection: &LoadedCollection<T>,
    ) -> Result<()> {
        let json = self.collection_json(collection)?;
        let content = serde_json::to_string_pretty(&json)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(
            "Exported {} entries to {}",
            collection.len(),
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        Ok(())
    }

    fn collection_json<T: Serialize + Sync>(
        &self,
        collection: &LoadedCollection<T>,
    ) -> Result<Value> {
        let rendered: Vec<(String, Value)> = collection
            .entries
            .par_iter()
            .map(|(key, entry)| -> Result<(String, Value), serde_json::Error> {
                let mut record = Map::new();
                record.insert("id".to_string(), Value::String(entry.id.clone()));
                record.insert("data".to_string(), serde_json::to_value(&entry.data)?);
                record.insert(
                    "html".to_string(),
                    Value::String(self.renderer.render(&entry.body)),
                );
                Ok((key.clone(), Value::Object(record)))
            })
            .collect::<Result<_, _>>()?;

        Ok(Value::Object(rendered.into_iter().collect()))
    }
}
