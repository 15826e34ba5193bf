//! Error types for document conversion.

/// Error during file conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// I/O error reading an input file.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// A footnote definition line contains no `href="..."` to link to.
    #[error("footnote definition [^{id}] has no href")]
    MalformedReference {
        /// Numeric footnote id as written in the source.
        id: String,
    },
}
