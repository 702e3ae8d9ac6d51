//! Helper functions shared by the build and the CLI

mod date;
mod url;

pub use date::*;
pub use url::*;
