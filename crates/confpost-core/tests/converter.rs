//! Integration tests for file conversion.

use std::fs;

use confpost_core::{Document, FileConverter};
use pretty_assertions::assert_eq;

#[test]
fn single_markdown_file_gets_title_from_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty_md.md");
    fs::write(&path, "").unwrap();

    let result = FileConverter::new().convert(&path).unwrap();
    assert_eq!(result, vec![Some(Document::new("empty_md", ""))]);
}

#[test]
fn single_html_file_gets_title_from_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty_html.html");
    fs::write(&path, "").unwrap();

    let result = FileConverter::new().convert(&path).unwrap();
    assert_eq!(result, vec![Some(Document::new("empty_html", ""))]);
}

#[test]
fn directory_preserves_positional_entries_for_unrecognized_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty_html.html"), "").unwrap();
    fs::write(dir.path().join("ignored.txt"), "not processed").unwrap();
    fs::write(dir.path().join("empty_md.md"), "").unwrap();

    let result = FileConverter::new().convert(dir.path()).unwrap();

    // One entry per directory listing element, in enumeration order;
    // the unrecognized file holds its position as None.
    assert_eq!(result.len(), 3);
    assert_eq!(result.iter().filter(|entry| entry.is_none()).count(), 1);

    let mut titles: Vec<&str> = result
        .iter()
        .flatten()
        .map(|document| document.title.as_str())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["empty_html", "empty_md"]);
    for document in result.iter().flatten() {
        assert_eq!(document.content, "");
    }
}

#[test]
fn markdown_document_is_fully_converted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("code_block.md");
    fs::write(
        &path,
        "## Code\n\n```python\ndef my_func():\n    return 1\n```\n",
    )
    .unwrap();

    let result = FileConverter::new().convert(&path).unwrap();
    let document = result[0].as_ref().unwrap();
    assert_eq!(document.title, "code_block");
    assert_eq!(
        document.content,
        "<h2>Code</h2>\n\
         <ac:structured-macro ac:name=\"code\">\
         <ac:parameter ac:name=\"theme\">Midnight</ac:parameter>\
         <ac:parameter ac:name=\"linenumbers\">true</ac:parameter>\
         <ac:parameter ac:name=\"language\">python</ac:parameter>\
         <ac:plain-text-body><![CDATA[def my_func():\n    return 1\n]]></ac:plain-text-body>\
         </ac:structured-macro>\n"
    );
}
