//! Front-matter extraction

use serde_yaml::{Mapping, Value};

use super::error::DocumentError;
use super::schema::type_name;

/// Untyped front-matter of a single document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub fields: Mapping,
}

impl FrontMatter {
    /// Split a document into its front-matter and body.
    ///
    /// The block must open with a `---` line at the very top and close with
    /// another `---` line. A document without a block has empty front-matter.
    pub fn parse(content: &str) -> Result<(Self, &str), DocumentError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = strip_delimiter(content) else {
            return Ok((FrontMatter::default(), content));
        };

        // Closing delimiter, either right away or on a later line
        let (yaml, body) = if let Some(after) = strip_delimiter(rest) {
            ("", after)
        } else if let Some(end_pos) = find_closing(rest) {
            let yaml = &rest[..end_pos];
            let after = &rest[end_pos + 1..];
            (yaml, strip_delimiter(after).unwrap_or(""))
        } else {
            return Err(DocumentError::MalformedFrontMatter(
                "missing closing `---`".to_string(),
            ));
        };

        let body = body.trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| DocumentError::MalformedFrontMatter(e.to_string()))?;

        match value {
            Value::Mapping(fields) => Ok((FrontMatter { fields }, body)),
            Value::Null => Ok((FrontMatter::default(), body)),
            other => Err(DocumentError::MalformedFrontMatter(format!(
                "expected a mapping, found {}",
                type_name(&other)
            ))),
        }
    }
}

/// Strip a `---` line from the start of `s`, returning what follows it
fn strip_delimiter(s: &str) -> Option<&str> {
    let rest = s.strip_prefix("---")?;
    let rest = rest.trim_start_matches([' ', '\t']);
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Byte offset of the newline that precedes the closing `---` line
fn find_closing(s: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(pos) = s[offset..].find("\n---") {
        let newline = offset + pos;
        if strip_delimiter(&s[newline + 1..]).is_some() {
            return Some(newline);
        }
        offset = newline + 1;
    }
    None
}
