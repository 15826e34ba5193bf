//! Code block rewrite pass.
//!
//! Replaces rendered `<pre><code>` blocks with the Confluence `code` macro,
//! carrying the fence language over as the macro's `language` parameter.
//! Runs after the admonition pass so code bodies are never mistaken for
//! blockquote or marker content; its own output contains no `<pre><code>`
//! and is therefore never re-scanned.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::macros::Macro;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code[^>]*?(?: class="(?P<class>[^"]*)")?[^>]*?>(?P<content>.*?)</code></pre>"#)
        .unwrap()
});

/// Convert `<pre><code>` blocks to Confluence `code` macros.
#[must_use]
pub fn convert_code_blocks(html: &str) -> String {
    CODE_BLOCK
        .replace_all(html, |caps: &Captures<'_>| {
            let language = caps
                .name("class")
                .map_or("none", |class| language_from_class(class.as_str()));
            Macro::new("code")
                .param("theme", "Midnight")
                .param("linenumbers", "true")
                .param("language", language)
                .plain_text_body(unescape_entities(&caps["content"]))
                .to_storage()
        })
        .into_owned()
}

/// Extract the language from a `language-xyz` class attribute value.
fn language_from_class(class: &str) -> &str {
    class.rsplit('-').next().unwrap_or(class)
}

/// Undo the renderer's HTML entity escaping.
///
/// The macro body is emitted inside CDATA, where a double-encoded `&lt;`
/// would render literally. The replacement order mirrors the escaping
/// order of the upstream renderer.
fn unescape_entities(content: &str) -> String {
    content
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_code_blocks_is_identity() {
        let html = "<p>Inline <code>code</code> stays as is</p>";
        assert_eq!(convert_code_blocks(html), html);
    }

    #[test]
    fn fenced_block_with_language_becomes_code_macro() {
        let html = "<pre><code class=\"language-python\">def my_func():\n    return 1\n</code></pre>";
        let result = convert_code_blocks(html);
        assert_eq!(
            result,
            "<ac:structured-macro ac:name=\"code\">\
             <ac:parameter ac:name=\"theme\">Midnight</ac:parameter>\
             <ac:parameter ac:name=\"linenumbers\">true</ac:parameter>\
             <ac:parameter ac:name=\"language\">python</ac:parameter>\
             <ac:plain-text-body><![CDATA[def my_func():\n    return 1\n]]></ac:plain-text-body>\
             </ac:structured-macro>"
        );
    }

    #[test]
    fn block_without_class_gets_language_none() {
        let html = "<pre><code>line 1 of code\nline 2 of code\n</code></pre>";
        let result = convert_code_blocks(html);
        assert!(result.contains(r#"<ac:parameter ac:name="language">none</ac:parameter>"#));
        assert!(result.contains("<![CDATA[line 1 of code\nline 2 of code\n]]>"));
    }

    #[test]
    fn escaped_entities_are_restored_in_the_body() {
        let html = "<pre><code class=\"language-rust\">if a &lt; b &amp;&amp; c &gt; d { print(&quot;x&quot;) }\n</code></pre>";
        let result = convert_code_blocks(html);
        assert!(result.contains(r#"<![CDATA[if a < b && c > d { print("x") }"#));
    }

    #[test]
    fn multiple_blocks_are_each_converted() {
        let html = "<pre><code class=\"language-go\">a\n</code></pre>\n<p>between</p>\n<pre><code>b\n</code></pre>";
        let result = convert_code_blocks(html);
        assert!(result.contains(r#"<ac:parameter ac:name="language">go</ac:parameter>"#));
        assert!(result.contains(r#"<ac:parameter ac:name="language">none</ac:parameter>"#));
        assert!(result.contains("<p>between</p>"));
        assert!(!result.contains("<pre>"));
    }
}
