//! Typed builder for Confluence structured macros.
//!
//! All macro markup emitted by the rewrite passes goes through [`Macro`] and
//! its single [`to_storage`](Macro::to_storage) serializer, so the
//! `<ac:structured-macro>` vocabulary lives in exactly one place. Parameter
//! order is preserved as given; Confluence's parser is sensitive to it.

use std::fmt::Write;

/// Macro body variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MacroBody {
    /// No body (parameter-only macros such as `toc`).
    None,
    /// Literal text wrapped in `<ac:plain-text-body><![CDATA[...]]>`.
    /// The content is emitted verbatim, never entity-escaped.
    PlainText(String),
    /// Storage-format XHTML wrapped in `<ac:rich-text-body>`.
    RichText(String),
}

/// A structured macro: name, ordered parameters, body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Macro {
    name: &'static str,
    params: Vec<(&'static str, String)>,
    body: MacroBody,
}

impl Macro {
    /// Start building a macro with the given name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
            body: MacroBody::None,
        }
    }

    /// Append a named parameter. Order of calls is the order of emission.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Set a CDATA plain-text body.
    #[must_use]
    pub fn plain_text_body(mut self, body: impl Into<String>) -> Self {
        self.body = MacroBody::PlainText(body.into());
        self
    }

    /// Set a rich-text body.
    #[must_use]
    pub fn rich_text_body(mut self, body: impl Into<String>) -> Self {
        self.body = MacroBody::RichText(body.into());
        self
    }

    /// Serialize to Confluence storage format.
    #[must_use]
    pub fn to_storage(&self) -> String {
        let mut out = String::with_capacity(128);
        write!(out, r#"<ac:structured-macro ac:name="{}">"#, self.name).unwrap();
        for (name, value) in &self.params {
            write!(out, r#"<ac:parameter ac:name="{name}">{value}</ac:parameter>"#).unwrap();
        }
        match &self.body {
            MacroBody::None => {}
            MacroBody::PlainText(body) => {
                write!(out, "<ac:plain-text-body><![CDATA[{body}]]></ac:plain-text-body>").unwrap();
            }
            MacroBody::RichText(body) => {
                write!(out, "<ac:rich-text-body>{body}</ac:rich-text-body>").unwrap();
            }
        }
        out.push_str("</ac:structured-macro>");
        out
    }
}

/// Admonition panel kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmonitionKind {
    Info,
    Note,
    Warning,
}

impl AdmonitionKind {
    /// Confluence macro name for this kind.
    #[must_use]
    pub fn macro_name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Note => "note",
            Self::Warning => "warning",
        }
    }

    /// Blockquote label word that classifies this kind, if any.
    #[must_use]
    pub(crate) fn label(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Note => Some("Note"),
            Self::Warning => Some("Warning"),
        }
    }

    /// Opening markup spliced in place of each `<p>` inside an admonition.
    ///
    /// Admonition bodies are built by substituting the source paragraph tags
    /// rather than wrapping a finished body, so the wrapper is exposed as an
    /// open/close pair. The shape matches [`Macro::to_storage`] with a
    /// rich-text body.
    #[must_use]
    pub(crate) fn open_tag(self) -> String {
        format!(
            r#"<p><ac:structured-macro ac:name="{}"><ac:rich-text-body><p>"#,
            self.macro_name()
        )
    }

    /// Closing markup spliced in place of each `</p>`.
    #[must_use]
    pub(crate) fn close_tag() -> &'static str {
        "</p></ac:rich-text-body></ac:structured-macro></p>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parameters_are_emitted_in_insertion_order() {
        let markup = Macro::new("code")
            .param("theme", "Midnight")
            .param("linenumbers", "true")
            .param("language", "rust")
            .to_storage();
        assert_eq!(
            markup,
            r#"<ac:structured-macro ac:name="code"><ac:parameter ac:name="theme">Midnight</ac:parameter><ac:parameter ac:name="linenumbers">true</ac:parameter><ac:parameter ac:name="language">rust</ac:parameter></ac:structured-macro>"#
        );
    }

    #[test]
    fn plain_text_body_is_cdata_wrapped_verbatim() {
        let markup = Macro::new("code").plain_text_body("a < b && c").to_storage();
        assert_eq!(
            markup,
            r#"<ac:structured-macro ac:name="code"><ac:plain-text-body><![CDATA[a < b && c]]></ac:plain-text-body></ac:structured-macro>"#
        );
    }

    #[test]
    fn rich_text_body_is_wrapped() {
        let markup = Macro::new("info")
            .rich_text_body("<p>Hello</p>")
            .to_storage();
        assert_eq!(
            markup,
            r#"<ac:structured-macro ac:name="info"><ac:rich-text-body><p>Hello</p></ac:rich-text-body></ac:structured-macro>"#
        );
    }

    #[test]
    fn admonition_wrappers_match_the_serialized_shape() {
        let serialized = Macro::new("note").rich_text_body("<p>x</p>").to_storage();
        let spliced = format!(
            "{}x{}",
            AdmonitionKind::Note.open_tag(),
            AdmonitionKind::close_tag()
        );
        assert_eq!(spliced, format!("<p>{serialized}</p>"));
    }
}
