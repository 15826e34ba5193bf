//! CLI error types.

use confpost_confluence::ConfluenceError;
use confpost_core::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    #[error("{0}")]
    Validation(String),
}
