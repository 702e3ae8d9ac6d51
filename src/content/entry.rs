//! Blog post and project records

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_yaml::Mapping;

use super::error::FieldIssue;
use super::schema::{Fields, Schema};

/// Author used when a post does not name one
pub const DEFAULT_AUTHOR: &str = "Alex Vig";

/// A validated blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub author: String,
    pub hero_image: Option<String>,
    pub tags: Vec<String>,
    /// Drafts are validated but left out of published listings
    pub draft: bool,
    pub featured: bool,
}

impl Schema for BlogPost {
    fn from_front_matter(map: &Mapping) -> Result<Self, Vec<FieldIssue>> {
        let mut f = Fields::new(map);
        let post = BlogPost {
            title: f.required_string("title"),
            description: f.required_string("description"),
            pub_date: f.required_date("pubDate"),
            updated_date: f.optional_date("updatedDate"),
            author: f.string_or("author", DEFAULT_AUTHOR),
            hero_image: f.optional_string("heroImage"),
            tags: f.string_list("tags"),
            draft: f.bool_or("draft", false),
            featured: f.bool_or("featured", false),
        };
        f.finish(post)
    }
}

impl BlogPost {
    /// Most recent modification date
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_date.unwrap_or(self.pub_date)
    }
}

/// A validated portfolio project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub hero_image: Option<String>,
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub repo_url: Option<String>,
    pub featured: bool,
    /// Manual sort key, ascending
    pub order: f64,
}

impl Schema for Project {
    fn from_front_matter(map: &Mapping) -> Result<Self, Vec<FieldIssue>> {
        let mut f = Fields::new(map);
        let project = Project {
            title: f.required_string("title"),
            description: f.required_string("description"),
            pub_date: f.required_date("pubDate"),
            hero_image: f.optional_string("heroImage"),
            technologies: f.string_list("technologies"),
            live_url: f.optional_url("liveUrl"),
            repo_url: f.optional_url("repoUrl"),
            featured: f.bool_or("featured", false),
            order: f.number_or("order", 0.0),
        };
        f.finish(project)
    }
}

/// A validated document of a collection
#[derive(Debug, Clone, Serialize)]
pub struct Entry<T> {
    /// Path relative to the collection base, without extension
    pub id: String,
    /// Path relative to the collection base, with extension
    pub path: String,
    /// Markdown source after the front-matter block
    #[serde(skip)]
    pub body: String,
    pub data: T,
}
