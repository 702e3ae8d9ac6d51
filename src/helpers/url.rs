//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;
use crate::content::CollectionName;

/// Characters left as-is in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a full URL including the site origin
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://alexvig.dev/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}/{}", config.origin(), path.trim_start_matches('/'))
}

/// Site-relative path of an entry page, e.g. `/blog/2024/hello/`
pub fn entry_path(collection: CollectionName, id: &str) -> String {
    let encoded: Vec<String> = id.split('/').map(encode_segment).collect();
    format!("/{}/{}/", collection.as_str(), encoded.join("/"))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
