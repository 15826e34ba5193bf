//! File conversion driver.
//!
//! Resolves input files to [`Document`]s: Markdown is rendered to HTML with
//! pulldown-cmark first, HTML enters the rewrite pipeline directly, anything
//! else yields `None` while keeping its position in the directory listing.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Options, Parser, html};
use tracing::debug;

use crate::document::Document;
use crate::error::ConvertError;
use crate::{admonitions, code_blocks, links, references};

/// Run the full rewrite pipeline over rendered HTML.
///
/// Pass order is fixed: admonitions (including toc substitution) must run
/// before link normalization and code block conversion, and footnote
/// references come last. Later passes must not match markup emitted by
/// earlier ones.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedReference`] when a footnote definition
/// has no href.
pub fn convert_storage(html: &str) -> Result<String, ConvertError> {
    let converted = admonitions::convert_admonitions(html);
    let converted = links::convert_links(&converted);
    let converted = code_blocks::convert_code_blocks(&converted);
    references::convert_references(&converted)
}

/// Converts Markdown and HTML files into Confluence-ready documents.
#[derive(Clone, Copy, Debug)]
pub struct FileConverter {
    options: Options,
}

impl Default for FileConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConverter {
    /// Create a new converter with table support enabled.
    /// Fenced code blocks are part of `CommonMark` and always on.
    #[must_use]
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        Self { options }
    }

    /// Convert a file or every file in a directory.
    ///
    /// Directory entries are processed in enumeration order, and each input
    /// file yields exactly one element: `Some(Document)` for recognized
    /// extensions, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`] on read failures and propagates
    /// conversion errors from the rewrite pipeline.
    pub fn convert(&self, path: &Path) -> Result<Vec<Option<Document>>, ConvertError> {
        if path.is_dir() {
            let mut documents = Vec::new();
            for entry in fs::read_dir(path)? {
                documents.push(self.process_file(&entry?.path())?);
            }
            Ok(documents)
        } else {
            Ok(vec![self.process_file(path)?])
        }
    }

    /// Convert a single file, returning `None` for unrecognized extensions.
    fn process_file(&self, path: &Path) -> Result<Option<Document>, ConvertError> {
        let Some(title) = page_title(path) else {
            return Ok(None);
        };

        let document = match path.extension().and_then(|ext| ext.to_str()) {
            Some("md") => {
                debug!("Rendering markdown file {}", path.display());
                let markdown = fs::read_to_string(path)?;
                let storage = convert_storage(&self.render_markdown(&markdown))?;
                Some(Document::new(title, storage))
            }
            Some("html") => {
                debug!("Converting html file {}", path.display());
                let raw_html = fs::read_to_string(path)?;
                Some(Document::new(title, convert_storage(&raw_html)?))
            }
            _ => {
                debug!("Skipping unrecognized file {}", path.display());
                None
            }
        };
        Ok(document)
    }

    /// Render Markdown to HTML.
    fn render_markdown(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Page title: the file's base name with path and extension removed.
fn page_title(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render_markdown(markdown: &str) -> String {
        FileConverter::new().render_markdown(markdown)
    }

    #[test]
    fn markdown_renders_with_fenced_code_and_tables() {
        let html = render_markdown("```python\nx = 1\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains(r#"<pre><code class="language-python">"#));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn full_pipeline_converts_rendered_markdown() {
        let html = render_markdown("> Note: remember this\n\n```rust\nlet x = 1;\n```\n");
        let storage = convert_storage(&html).unwrap();
        assert!(storage.contains(r#"<ac:structured-macro ac:name="note">"#));
        assert!(storage.contains(r#"<ac:parameter ac:name="language">rust</ac:parameter>"#));
        assert!(storage.contains("<![CDATA[let x = 1;\n]]>"));
        assert!(!storage.contains("<blockquote>"));
        assert!(!storage.contains("<pre>"));
    }

    #[test]
    fn pipeline_is_idempotent_on_its_own_output() {
        let html = render_markdown(
            "> Warning: fragile\n\nSee [page](other_page.md)\n\n```sh\nls -l\n```\n",
        );
        let once = convert_storage(&html).unwrap();
        let twice = convert_storage(&once).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn code_bodies_are_untouched_by_link_and_admonition_rewrites() {
        let html = render_markdown("```\n<blockquote>not a quote</blockquote>\n~?not a marker?~\n```\n");
        let storage = convert_storage(&html).unwrap();
        assert!(storage.contains("<![CDATA[<blockquote>not a quote</blockquote>\n~?not a marker?~\n]]>"));
        assert_eq!(storage.matches("ac:structured-macro").count(), 2);
    }
}
