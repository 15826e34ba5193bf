//! Link normalization pass.
//!
//! Converted pages lose their file extensions once they live in Confluence,
//! and page titles use spaces where file names use underscores. This pass
//! drops `.md`/`.html` from intra-site hrefs and rewrites single
//! underscore-joined hrefs accordingly.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static HREF_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<start><a[^>]* href=")(?P<link>[a-zA-Z]+_[a-zA-Z]+)(?P<end>"[^>]*>)"#).unwrap()
});

/// Normalize intra-site links for Confluence page naming.
#[must_use]
pub fn convert_links(html: &str) -> String {
    let stripped = html.replace(".md\"", "\"").replace(".html#", "#");
    HREF_UNDERSCORE
        .replace_all(&stripped, |caps: &Captures<'_>| {
            format!(
                "{}{}{}",
                &caps["start"],
                caps["link"].replace('_', " "),
                &caps["end"]
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_links_is_identity() {
        let html = "<p>plain text with under_scores outside links</p>";
        assert_eq!(convert_links(html), html);
    }

    #[test]
    fn markdown_extension_is_stripped_from_href() {
        let result = convert_links(r#"<a href="other-page.md">other</a>"#);
        assert_eq!(result, r#"<a href="other-page">other</a>"#);
    }

    #[test]
    fn html_extension_is_stripped_before_fragment() {
        let result = convert_links(r#"<a href="page.html#section">jump</a>"#);
        assert_eq!(result, r#"<a href="page#section">jump</a>"#);
    }

    #[test]
    fn underscore_pair_href_gets_a_space() {
        let result = convert_links(r#"<p>see <a class="x" href="foo_bar">foo</a></p>"#);
        assert_eq!(result, r#"<p>see <a class="x" href="foo bar">foo</a></p>"#);
    }

    #[test]
    fn hrefs_with_digits_or_slashes_are_left_alone() {
        let html = r#"<a href="foo_bar2">n</a> <a href="a/b_c">p</a>"#;
        assert_eq!(convert_links(html), html);
    }

    #[test]
    fn visible_link_text_keeps_its_underscores() {
        let result = convert_links(r#"<a href="foo_bar">foo_bar</a>"#);
        assert_eq!(result, r#"<a href="foo bar">foo_bar</a>"#);
    }
}
