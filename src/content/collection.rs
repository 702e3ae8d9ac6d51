//! Collection registry - the fixed set of content collections

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::error::ValidationError;
use super::loader::{CollectionLoader, LoadedCollection};
use super::{BlogPost, Entry, Project};
use crate::config::ConfigError;

const MARKDOWN_PATTERN: &str = "**/*.md";
const MDX_PATTERN: &str = "**/*.mdx";

/// Names of the collections a site has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionName {
    Blog,
    Projects,
}

impl CollectionName {
    pub const ALL: [CollectionName; 2] = [CollectionName::Blog, CollectionName::Projects];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Blog => "blog",
            CollectionName::Projects => "projects",
        }
    }

    /// Directory under the content root holding this collection
    pub fn base_dir(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(CollectionName::Blog),
            "projects" => Ok(CollectionName::Projects),
            other => Err(ConfigError::UnknownCollection(other.to_string())),
        }
    }
}

/// Where a collection's documents come from
#[derive(Debug, Clone)]
pub struct CollectionDefinition {
    pub name: CollectionName,
    pub loader: CollectionLoader,
}

impl CollectionDefinition {
    /// Definition rooted at `content_dir/<name>`.
    ///
    /// Without MDX support, `.mdx` files are still discovered but only
    /// reported as skipped.
    pub fn new(
        name: CollectionName,
        content_dir: &Path,
        mdx: bool,
    ) -> Result<Self, glob::PatternError> {
        let base = content_dir.join(name.base_dir());
        let loader = if mdx {
            CollectionLoader::new(name.as_str(), base, &[MARKDOWN_PATTERN, MDX_PATTERN])?
        } else {
            CollectionLoader::new(name.as_str(), base, &[MARKDOWN_PATTERN])?
                .with_disabled(&[MDX_PATTERN])?
        };
        Ok(Self { name, loader })
    }
}

/// A validated collection, borrowed from the registry
#[derive(Debug, Clone, Copy)]
pub enum CollectionRef<'a> {
    Blog(&'a LoadedCollection<BlogPost>),
    Projects(&'a LoadedCollection<Project>),
}

impl<'a> CollectionRef<'a> {
    pub fn len(&self) -> usize {
        match self {
            CollectionRef::Blog(c) => c.len(),
            CollectionRef::Projects(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn errors(&self) -> &'a [ValidationError] {
        match *self {
            CollectionRef::Blog(c) => &c.errors,
            CollectionRef::Projects(c) => &c.errors,
        }
    }
}

/// Every collection of the site, validated once per build
#[derive(Debug, Default)]
pub struct Collections {
    pub blog: LoadedCollection<BlogPost>,
    pub projects: LoadedCollection<Project>,
}

impl Collections {
    /// Load every collection under `content_dir`
    pub fn load(content_dir: &Path, mdx: bool) -> Result<Self, glob::PatternError> {
        let blog = CollectionDefinition::new(CollectionName::Blog, content_dir, mdx)?;
        let projects = CollectionDefinition::new(CollectionName::Projects, content_dir, mdx)?;

        let (blog, projects) = rayon::join(
            || blog.loader.load::<BlogPost>(),
            || projects.loader.load::<Project>(),
        );

        let skipped = blog
            .skipped
            .iter()
            .map(|p| (CollectionName::Blog, p))
            .chain(projects.skipped.iter().map(|p| (CollectionName::Projects, p)));
        for (name, path) in skipped {
            tracing::warn!(
                "Skipping {}/{}: the mdx integration is not enabled",
                name,
                path.display()
            );
        }

        Ok(Self { blog, projects })
    }

    /// Look up a collection by its public name
    pub fn get(&self, name: &str) -> Result<CollectionRef<'_>, ConfigError> {
        Ok(self.collection(name.parse()?))
    }

    pub fn collection(&self, name: CollectionName) -> CollectionRef<'_> {
        match name {
            CollectionName::Blog => CollectionRef::Blog(&self.blog),
            CollectionName::Projects => CollectionRef::Projects(&self.projects),
        }
    }

    /// Every excluded document across all collections
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.blog.errors.iter().chain(self.projects.errors.iter())
    }

    pub fn error_count(&self) -> usize {
        self.blog.errors.len() + self.projects.errors.len()
    }

    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Non-draft posts, newest first
    pub fn published_posts(&self) -> Vec<&Entry<BlogPost>> {
        let mut posts: Vec<_> = self.blog.iter().filter(|e| !e.data.draft).collect();
        posts.sort_by(|a, b| {
            b.data
                .pub_date
                .cmp(&a.data.pub_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        posts
    }

    /// Featured, non-draft posts, newest first
    pub fn featured_posts(&self) -> Vec<&Entry<BlogPost>> {
        self.published_posts()
            .into_iter()
            .filter(|e| e.data.featured)
            .collect()
    }

    /// Projects by `order` ascending, then newest first
    pub fn sorted_projects(&self) -> Vec<&Entry<Project>> {
        let mut projects: Vec<_> = self.projects.iter().collect();
        projects.sort_by(|a, b| {
            a.data
                .order
                .total_cmp(&b.data.order)
                .then_with(|| b.data.pub_date.cmp(&a.data.pub_date))
                .then_with(|| a.id.cmp(&b.id))
        });
        projects
    }

    pub fn featured_projects(&self) -> Vec<&Entry<Project>> {
        self.sorted_projects()
            .into_iter()
            .filter(|e| e.data.featured)
            .collect()
    }

    /// Post count per tag over published posts
    pub fn tag_counts(&self) -> BTreeMap<&str, usize> {
        let mut tags = BTreeMap::new();
        for post in self.published_posts() {
            for tag in &post.data.tags {
                *tags.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        tags
    }
}
