//! Markdown/HTML to Confluence storage format conversion.
//!
//! Takes Markdown or XHTML input and rewrites it into Confluence storage
//! format, replacing generic HTML constructs with the structured macros
//! Confluence renders natively:
//!
//! - Admonition markers and blockquotes become `info`/`note`/`warning` panels
//! - Doctoc comment blocks become the `toc` macro
//! - `<pre><code>` blocks become the `code` macro with language detection
//! - Footnote-style references become superscript anchors
//! - Relative links are normalized for Confluence page naming
//!
//! The rewrite passes are ordered: admonitions (with toc) run first, then
//! link normalization, then code blocks, then footnote references. Later
//! passes must not re-trigger on markup emitted by earlier ones.

mod admonitions;
mod code_blocks;
mod converter;
mod document;
mod error;
mod links;
mod macros;
mod references;

pub use converter::{FileConverter, convert_storage};
pub use document::Document;
pub use error::ConvertError;
pub use macros::{AdmonitionKind, Macro, MacroBody};
