//! Confluence REST API types.

use serde::Deserialize;

/// Content search response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResults {
    pub results: Vec<Page>,
}

/// A Confluence page as returned by the content API.
#[derive(Debug, Deserialize)]
pub struct Page {
    /// Page id.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Version info (present when requested via `expand=version`).
    #[serde(default)]
    pub version: Option<Version>,
}

/// Page version info.
#[derive(Debug, Deserialize)]
pub struct Version {
    /// Version number, incremented on every update.
    pub number: u32,
}
