//! Admonition and table-of-contents rewrite pass.
//!
//! Three sources of admonitions are recognized:
//!
//! - custom inline markers `~?...?~` (info), `~!...!~` (note) and
//!   `~%...%~` (warning) wrapping a rendered paragraph,
//! - `<blockquote>` elements, classified by a leading `Note`/`Warning`
//!   label on the first rendered line (anything else is `info`),
//! - doctoc comment blocks, replaced wholesale by the `toc` macro.
//!
//! Blockquote replacement is span-based: match ranges are collected first
//! and spliced back-to-front, so duplicate blockquote bodies are each
//! converted independently.

use std::sync::LazyLock;

use regex::Regex;

use crate::macros::{AdmonitionKind, Macro};

static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<blockquote>(.*?)</blockquote>").unwrap());

static DOCTOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!-- START doctoc.*?END doctoc -->").unwrap());

static NOTE_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^<.*>Note").unwrap());

static WARNING_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^<.*>Warning").unwrap());

static FIRST_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

/// Convert admonition markers, blockquotes and doctoc blocks to macros.
#[must_use]
pub fn convert_admonitions(html: &str) -> String {
    let converted = convert_markers(html);
    let converted = convert_blockquotes(&converted);
    convert_doctoc(&converted)
}

/// Replace the custom `~?`/`~!`/`~%` paragraph markers with panel wrappers.
///
/// A plain literal substitution: nested markers are not supported and the
/// opening and closing markers are replaced independently.
fn convert_markers(html: &str) -> String {
    let close = AdmonitionKind::close_tag();
    html.replace("<p>~?", &AdmonitionKind::Info.open_tag())
        .replace("?~</p>", close)
        .replace("<p>~!", &AdmonitionKind::Note.open_tag())
        .replace("!~</p>", close)
        .replace("<p>~%", &AdmonitionKind::Warning.open_tag())
        .replace("%~</p>", close)
}

fn convert_blockquotes(html: &str) -> String {
    let mut edits = Vec::new();
    for caps in BLOCKQUOTE.captures_iter(html) {
        let span = caps.get(0).unwrap().range();
        edits.push((span, admonition_markup(&caps[1])));
    }

    let mut out = html.to_owned();
    for (span, markup) in edits.into_iter().rev() {
        out.replace_range(span, &markup);
    }
    out
}

/// Build the panel markup for one blockquote body.
fn admonition_markup(quote: &str) -> String {
    let kind = classify(quote);
    let body = match kind.label() {
        Some(label) => capitalize_after_first_tag(&strip_label(quote.trim(), label)),
        None => quote.to_owned(),
    };
    body.replace("<p>", &kind.open_tag())
        .replace("</p>", AdmonitionKind::close_tag())
        .trim()
        .to_owned()
}

/// Classify a blockquote by the label on its first rendered line.
fn classify(quote: &str) -> AdmonitionKind {
    let trimmed = quote.trim();
    if NOTE_LABEL.is_match(trimmed) {
        AdmonitionKind::Note
    } else if WARNING_LABEL.is_match(trimmed) {
        AdmonitionKind::Warning
    } else {
        AdmonitionKind::Info
    }
}

/// Placement of a `Note`/`Warning` label inside the quote's first line.
///
/// Each variant covers one label format, with or without a space before the
/// colon: plain text, wrapped in tags on both sides, or inside an emphasis
/// tag with the colon either inside or outside the closing tag. Variants are
/// tried in order and exactly one stripping substitution is applied.
#[derive(Clone, Copy)]
enum LabelStyle {
    /// `Note: ` / `Note : ` in plain text.
    Plain,
    /// `<em>Note: </em>`: label and colon wrapped by tags on both sides.
    TagWrapped,
    /// `<em>Note:</em> `: colon inside the emphasis tag.
    ColonInsideEmphasis,
    /// `<em>Note</em>: `: colon outside the emphasis tag.
    ColonOutsideEmphasis,
}

impl LabelStyle {
    const ALL: [Self; 4] = [
        Self::Plain,
        Self::TagWrapped,
        Self::ColonInsideEmphasis,
        Self::ColonOutsideEmphasis,
    ];

    fn pattern(self, label: &str) -> String {
        match self {
            Self::Plain => format!(r"(?i){label}\s?:\s"),
            Self::TagWrapped => format!(r"(?i)<.*?>{label}\s?:\s<.*?>"),
            Self::ColonInsideEmphasis => format!(r"(?i)<(em|strong)>{label}\s?:<.*?>\s"),
            Self::ColonOutsideEmphasis => format!(r"(?i)<(em|strong)>{label}\s?<.*?>:\s"),
        }
    }
}

/// Remove the first matching label format from the quote.
fn strip_label(quote: &str, label: &str) -> String {
    for style in LabelStyle::ALL {
        let re = Regex::new(&style.pattern(label)).unwrap();
        if re.is_match(quote) {
            return re.replace(quote, "").into_owned();
        }
    }
    quote.to_owned()
}

/// Uppercase the first character following the first tag, restoring the
/// capitalization lost when the label was stripped.
fn capitalize_after_first_tag(text: &str) -> String {
    let Some(m) = FIRST_TAG.find(text) else {
        return text.to_owned();
    };
    let (head, tail) = text.split_at(m.end());
    let mut chars = tail.chars();
    match chars.next() {
        Some(first) => format!("{head}{}{}", first.to_uppercase(), chars.as_str()),
        None => text.to_owned(),
    }
}

fn convert_doctoc(html: &str) -> String {
    DOCTOC.replace_all(html, toc_markup()).into_owned()
}

/// Fixed `toc` macro substituted for doctoc comment blocks.
fn toc_markup() -> String {
    let toc = Macro::new("toc")
        .param("printable", "true")
        .param("style", "disc")
        .param("maxLevel", "7")
        .param("minLevel", "1")
        .param("type", "list")
        .param("outline", "clear")
        .param("include", ".*")
        .to_storage();
    format!("<p>{toc}</p>")
}
