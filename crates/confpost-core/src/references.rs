//! Footnote reference rewrite pass.
//!
//! Markdown footnotes survive HTML rendering as literal `[^N]` markers plus
//! a definition line per id. This pass extracts the href from each
//! definition, removes the definition line and turns every inline `[^N]`
//! into a superscript anchor. Definition removal is span-based and applied
//! back-to-front so duplicate definition text cannot shift later spans.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertError;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?P<bare>\[\^(?P<bare_id>\d)\].*)|<p>(?P<para>\[\^(?P<para_id>\d)\].*)").unwrap()
});

static HREF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"href="(.*?)""#).unwrap());

/// One footnote definition found in the body.
struct Definition {
    span: Range<usize>,
    id: String,
    href: String,
}

/// Convert footnote definitions and references to superscript anchors.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedReference`] when a definition line
/// contains no `href="..."` to link the references to.
pub fn convert_references(html: &str) -> Result<String, ConvertError> {
    let mut definitions = Vec::new();
    for caps in DEFINITION.captures_iter(html) {
        let (line, id) = if let Some(line) = caps.name("bare") {
            (line.as_str(), &caps["bare_id"])
        } else {
            (&caps["para"], &caps["para_id"])
        };
        let href = HREF
            .captures(line)
            .and_then(|href_caps| href_caps.get(1))
            .ok_or_else(|| ConvertError::MalformedReference { id: id.to_owned() })?
            .as_str()
            .to_owned();
        definitions.push(Definition {
            span: caps.get(0).unwrap().range(),
            id: id.to_owned(),
            href,
        });
    }

    let mut out = html.to_owned();
    for definition in definitions.iter().rev() {
        out.replace_range(definition.span.clone(), "");
    }
    for definition in &definitions {
        let marker = format!("[^{}]", definition.id);
        let anchor = format!(
            r#"<a href="{}"><sup>{}</sup></a>"#,
            definition.href, definition.id
        );
        out = out.replace(&marker, &anchor);
    }
    Ok(out)
}
