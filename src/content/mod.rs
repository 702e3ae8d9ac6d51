//! Content module - front-matter, schemas and collections

pub mod collection;
mod date;
mod entry;
pub mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod schema;

pub use collection::{CollectionName, CollectionRef, Collections};
pub use date::parse_date_str;
pub use entry::{BlogPost, Entry, Project, DEFAULT_AUTHOR};
pub use error::{DocumentError, FieldIssue, IssueKind, ValidationError};
pub use frontmatter::FrontMatter;
pub use loader::{CollectionLoader, LoadedCollection};
pub use markdown::MarkdownRenderer;
pub use schema::{is_valid_url, Fields, Schema};
