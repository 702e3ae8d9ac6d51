//! Collection loader - discovers documents and validates their front-matter

use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{DocumentError, ValidationError};
use super::{Entry, FrontMatter, Schema};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Result of loading one collection
#[derive(Debug)]
pub struct LoadedCollection<T> {
    /// Valid entries keyed by path relative to the collection base
    pub entries: BTreeMap<String, Entry<T>>,
    /// Documents that were excluded
    pub errors: Vec<ValidationError>,
    /// Matched by a disabled pattern, never read
    pub skipped: Vec<PathBuf>,
}

impl<T> Default for LoadedCollection<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            errors: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> LoadedCollection<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&Entry<T>> {
        self.entries.get(path)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.values()
    }
}

/// Loads the documents under one base directory
#[derive(Debug, Clone)]
pub struct CollectionLoader {
    collection: &'static str,
    base: PathBuf,
    patterns: Vec<Pattern>,
    disabled: Vec<Pattern>,
}

/// Files found under a loader's base, relative to it
#[derive(Debug, Default, PartialEq)]
pub struct Discovered {
    pub documents: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl CollectionLoader {
    /// Create a loader. Patterns are matched against paths relative to `base`.
    pub fn new(
        collection: &'static str,
        base: impl Into<PathBuf>,
        patterns: &[&str],
    ) -> Result<Self, glob::PatternError> {
        Ok(Self {
            collection,
            base: base.into(),
            patterns: compile(patterns)?,
            disabled: Vec::new(),
        })
    }

    /// Also recognise `patterns`, reporting their matches as skipped instead of loading them
    pub fn with_disabled(mut self, patterns: &[&str]) -> Result<Self, glob::PatternError> {
        self.disabled = compile(patterns)?;
        Ok(self)
    }

    /// Enumerate matching files in one walk, sorted by relative path
    pub fn discover(&self) -> Discovered {
        let mut found = Discovered::default();
        if !self.base.is_dir() {
            tracing::debug!(
                "Collection {} has no directory at {:?}",
                self.collection,
                self.base
            );
            return found;
        }

        let files = WalkDir::new(&self.base)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable path in {:?}: {}", self.base, err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.path().strip_prefix(&self.base).ok().map(Path::to_path_buf));

        for relative in files {
            if matches_any(&self.patterns, &relative) {
                found.documents.push(relative);
            } else if matches_any(&self.disabled, &relative) {
                found.skipped.push(relative);
            }
        }

        found.documents.sort();
        found.skipped.sort();
        found
    }

    /// Load and validate every matching document.
    ///
    /// Documents are validated in parallel. A failing document never
    /// affects its siblings; its error is collected instead.
    pub fn load<T: Schema>(&self) -> LoadedCollection<T> {
        let Discovered { documents, skipped } = self.discover();

        let results: Vec<Result<Entry<T>, ValidationError>> = documents
            .par_iter()
            .map(|relative| self.load_document(relative))
            .collect();

        let mut collection = LoadedCollection {
            skipped,
            ..LoadedCollection::default()
        };
        for result in results {
            match result {
                Ok(entry) => {
                    collection.entries.insert(entry.path.clone(), entry);
                }
                Err(err) => {
                    tracing::debug!("Rejected {}", err);
                    collection.errors.push(err);
                }
            }
        }

        tracing::debug!(
            "Loaded collection {}: {} valid, {} invalid",
            self.collection,
            collection.entries.len(),
            collection.errors.len()
        );

        collection
    }

    /// Read and validate a single document
    fn load_document<T: Schema>(&self, relative: &Path) -> Result<Entry<T>, ValidationError> {
        let fail = |error: DocumentError| ValidationError {
            collection: self.collection,
            path: relative.to_path_buf(),
            error,
        };

        let content = fs::read_to_string(self.base.join(relative))
            .map_err(|e| fail(DocumentError::Read(e)))?;
        let (fm, body) = FrontMatter::parse(&content).map_err(fail)?;
        let data = T::from_front_matter(&fm.fields)
            .map_err(|issues| fail(DocumentError::Invalid(issues)))?;

        Ok(Entry {
            id: entry_id(relative),
            path: path_key(relative),
            body: body.to_string(),
            data,
        })
    }
}

fn compile(patterns: &[&str]) -> Result<Vec<Pattern>, glob::PatternError> {
    patterns.iter().map(|p| Pattern::new(p)).collect()
}

fn matches_any(patterns: &[Pattern], relative: &Path) -> bool {
    patterns
        .iter()
        .any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
}

/// Dotfiles and dot-directories are never content
fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|n| n.starts_with('.')).unwrap_or(false)
}

/// Relative path with `/` separators
fn path_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative path without the extension
fn entry_id(relative: &Path) -> String {
    path_key(&relative.with_extension(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BlogPost;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn loader(base: &Path) -> CollectionLoader {
        CollectionLoader::new("blog", base, &["**/*.md", "**/*.mdx"]).unwrap()
    }

    #[test]
    fn test_discover_matches_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "");
        write(dir.path(), "nested/deep/b.mdx", "");
        write(dir.path(), "notes.txt", "");
        write(dir.path(), ".hidden.md", "");
        write(dir.path(), ".cache/c.md", "");

        let found = loader(dir.path()).discover();
        assert_eq!(
            found.documents,
            vec![PathBuf::from("a.md"), PathBuf::from("nested/deep/b.mdx")]
        );
        assert!(found.skipped.is_empty());
    }

    #[test]
    fn test_underscore_documents_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let doc = "---\ntitle: Intro\ndescription: d\npubDate: 2024-01-01\n---\n";
        write(dir.path(), "_intro.md", doc);
        write(dir.path(), "_drafts/x.md", doc);

        let collection = CollectionLoader::new("blog", dir.path(), &["**/*.md"])
            .unwrap()
            .load::<BlogPost>();
        assert!(collection.is_valid());
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("_intro.md").unwrap().id, "_intro");
        assert!(collection.get("_drafts/x.md").is_some());
    }

    #[test]
    fn test_disabled_patterns_are_skipped_in_one_walk() {
        let dir = tempfile::tempdir().unwrap();
        let doc = "---\ntitle: T\ndescription: d\npubDate: 2024-01-01\n---\n";
        write(dir.path(), "a.md", doc);
        write(dir.path(), "nested/b.mdx", doc);
        write(dir.path(), "notes.txt", "");

        let loader = CollectionLoader::new("blog", dir.path(), &["**/*.md"])
            .unwrap()
            .with_disabled(&["**/*.mdx"])
            .unwrap();
        let found = loader.discover();
        assert_eq!(found.documents, vec![PathBuf::from("a.md")]);
        assert_eq!(found.skipped, vec![PathBuf::from("nested/b.mdx")]);

        let collection = loader.load::<BlogPost>();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.skipped, vec![PathBuf::from("nested/b.mdx")]);
        assert!(collection.is_valid());
    }

    #[test]
    fn test_missing_base_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let collection = loader(&dir.path().join("nope")).load::<BlogPost>();
        assert!(collection.is_empty());
        assert!(collection.is_valid());
    }

    #[test]
    fn test_invalid_document_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "good.md",
            "---\ntitle: Hello\ndescription: World\npubDate: 2024-01-01\n---\nBody\n",
        );
        write(
            dir.path(),
            "2024/no-title.md",
            "---\ndescription: World\npubDate: 2024-01-01\n---\n",
        );
        write(dir.path(), "broken.md", "---\ntitle: [oops\n---\n");

        let collection = loader(dir.path()).load::<BlogPost>();
        assert_eq!(collection.len(), 1);

        let good = collection.get("good.md").unwrap();
        assert_eq!(good.id, "good");
        assert_eq!(good.body, "Body\n");
        assert_eq!(good.data.author, "Alex Vig");

        assert_eq!(collection.errors.len(), 2);
        let missing = collection
            .errors
            .iter()
            .find(|e| e.path == Path::new("2024/no-title.md"))
            .unwrap();
        assert_eq!(missing.fields(), vec!["title"]);

        let broken = collection
            .errors
            .iter()
            .find(|e| e.path == Path::new("broken.md"))
            .unwrap();
        assert!(matches!(
            broken.error,
            DocumentError::MalformedFrontMatter(_)
        ));
    }

    #[test]
    fn test_nested_id_uses_forward_slashes() {
        assert_eq!(entry_id(Path::new("2024/01/post.md")), "2024/01/post");
        assert_eq!(path_key(Path::new("2024/01/post.md")), "2024/01/post.md");
    }
}
