//! Converted document ready for posting.

/// A fully converted page: title derived from the source file name and
/// content in Confluence storage format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Page title (source file stem, path and extension removed).
    pub title: String,
    /// Page body in Confluence storage format.
    pub content: String,
}

impl Document {
    /// Create a document from a title and converted content.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
