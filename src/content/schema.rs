//! Typed front-matter validation
//!
//! Each collection declares its record type by implementing [`Schema`]. The
//! implementation reads fields through [`Fields`], which records every
//! problem it encounters instead of stopping at the first one, so a single
//! pass reports all invalid fields of a document.

use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};

use super::date::coerce_date;
use super::error::{FieldIssue, IssueKind};

/// A record type that can be validated from raw front-matter
pub trait Schema: Sized + Send {
    /// Validate `fields`, returning the typed record or every field issue found
    fn from_front_matter(fields: &Mapping) -> Result<Self, Vec<FieldIssue>>;
}

/// Name of a YAML value's type, used in type mismatch reports
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(_) => "tagged value",
    }
}

/// Field reader over a front-matter mapping that accumulates issues.
///
/// Every accessor returns a placeholder when the field is invalid; callers
/// must finish with [`Fields::finish`], which discards the record if any
/// issue was recorded.
pub struct Fields<'a> {
    map: &'a Mapping,
    issues: Vec<FieldIssue>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Mapping) -> Self {
        Self {
            map,
            issues: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    fn push(&mut self, field: impl Into<String>, kind: IssueKind) {
        self.issues.push(FieldIssue::new(field, kind));
    }

    fn mismatch(&mut self, field: impl Into<String>, expected: &'static str, found: &Value) {
        self.push(
            field,
            IssueKind::TypeMismatch {
                expected,
                found: type_name(found),
            },
        );
    }

    fn string_value(&mut self, key: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.mismatch(key, "string", other);
                None
            }
        }
    }

    pub fn required_string(&mut self, key: &str) -> String {
        match self.get(key) {
            Some(value) => self.string_value(key, value).unwrap_or_default(),
            None => {
                self.push(key, IssueKind::MissingRequiredField);
                String::new()
            }
        }
    }

    pub fn optional_string(&mut self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        self.string_value(key, value)
    }

    pub fn string_or(&mut self, key: &str, default: &str) -> String {
        self.optional_string(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// A list of strings, empty when absent
    pub fn string_list(&mut self, key: &str) -> Vec<String> {
        let Some(value) = self.get(key) else {
            return Vec::new();
        };
        let Value::Sequence(items) = value else {
            self.mismatch(key, "array", value);
            return Vec::new();
        };

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => self.mismatch(format!("{}[{}]", key, i), "string", other),
            }
        }
        out
    }

    pub fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.mismatch(key, "boolean", other);
                default
            }
        }
    }

    pub fn number_or(&mut self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            None => default,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if !f.is_nan() => f,
                _ => {
                    self.push(
                        key,
                        IssueKind::TypeMismatch {
                            expected: "number",
                            found: "nan",
                        },
                    );
                    default
                }
            },
            Some(other) => {
                self.mismatch(key, "number", other);
                default
            }
        }
    }

    pub fn required_date(&mut self, key: &str) -> DateTime<Utc> {
        match self.get(key) {
            Some(value) => self.date_value(key, value).unwrap_or_default(),
            None => {
                self.push(key, IssueKind::MissingRequiredField);
                DateTime::default()
            }
        }
    }

    pub fn optional_date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        let value = self.get(key)?;
        self.date_value(key, value)
    }

    fn date_value(&mut self, key: &str, value: &Value) -> Option<DateTime<Utc>> {
        match coerce_date(value) {
            Ok(dt) => Some(dt),
            Err(kind) => {
                self.push(key, kind);
                None
            }
        }
    }

    /// An optional absolute URL, kept exactly as written
    pub fn optional_url(&mut self, key: &str) -> Option<String> {
        let url = self.optional_string(key)?;
        if is_valid_url(&url) {
            Some(url)
        } else {
            self.push(key, IssueKind::InvalidUrlFormat { input: url });
            None
        }
    }

    /// Return `record` if no issue was recorded
    pub fn finish<T>(self, record: T) -> Result<T, Vec<FieldIssue>> {
        if self.issues.is_empty() {
            Ok(record)
        } else {
            Err(self.issues)
        }
    }
}

/// A URL must have a scheme followed by `//` and a non-empty host.
///
/// `url::Url` normalizes `ftp:/bad` into `ftp://bad/`, so the authority
/// marker is checked on the raw input as well.
pub fn is_valid_url(input: &str) -> bool {
    let Ok(parsed) = url::Url::parse(input) else {
        return false;
    };
    if parsed.cannot_be_a_base() {
        return false;
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return false;
    }

    let trimmed = input.trim_start();
    trimmed
        .split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with("//"))
}
