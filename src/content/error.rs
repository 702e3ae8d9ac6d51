//! Validation errors for content documents

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single front-matter field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("required field is missing")]
    MissingRequiredField,

    #[error("expected {expected}, received {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid date `{input}`")]
    DateParseFailure { input: String },

    #[error("invalid url `{input}`")]
    InvalidUrlFormat { input: String },
}

/// A rejected field and the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Field name, with an index suffix for list elements (`tags[1]`)
    pub field: String,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.field, self.kind)
    }
}

/// Why a document was excluded from its collection
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed front-matter: {0}")]
    MalformedFrontMatter(String),

    #[error("{}", join_issues(.0))]
    Invalid(Vec<FieldIssue>),
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A document that failed to load, attributed to its source file
#[derive(Debug, Error)]
#[error("[{collection}] {}: {error}", .path.display())]
pub struct ValidationError {
    pub collection: &'static str,
    /// Path relative to the collection base
    pub path: PathBuf,
    pub error: DocumentError,
}

impl ValidationError {
    /// Field-level issues, empty for read and front-matter errors
    pub fn issues(&self) -> &[FieldIssue] {
        match &self.error {
            DocumentError::Invalid(issues) => issues,
            _ => &[],
        }
    }

    /// Names of the fields that failed
    pub fn fields(&self) -> Vec<&str> {
        self.issues().iter().map(|i| i.field.as_str()).collect()
    }

    /// The issue recorded for `field`, if any
    pub fn issue(&self, field: &str) -> Option<&IssueKind> {
        self.issues()
            .iter()
            .find(|i| i.field == field)
            .map(|i| &i.kind)
    }
}
