//! Document parsing: front matter, markdown rendering and title removal.
//!
//! A document is an optional YAML front matter block followed by a
//! markdown body:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-01-15
//! ---
//! # Hello
//!
//! Body text
//! ```

use super::error::{ContentError, Result};
use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::LazyLock;

/// Front matter fence line
const FENCE: &str = "---";

/// First top-level heading in rendered HTML.
static FIRST_H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h1[^>]*>(.*?)</h1>").unwrap());

/// Split a document into its front matter fields and markdown body.
///
/// Documents that do not open with a `---` line have no front matter.
/// An empty block yields no fields; a block that is not a YAML mapping,
/// or is never closed, is an error.
pub fn split_front_matter<'a>(path: &Path, raw: &'a str) -> Result<(Map<String, Value>, &'a str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(rest) = strip_fence_line(raw) else {
        return Ok((Map::new(), raw));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let fields = parse_fields(path, &rest[..offset])?;
            return Ok((fields, &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(ContentError::UnterminatedFrontMatter(path.to_path_buf()))
}

/// Return the text after the opening fence line, if `raw` starts with one.
fn strip_fence_line(raw: &str) -> Option<&str> {
    let end = raw.find('\n').map_or(raw.len(), |i| i + 1);
    let (first, rest) = raw.split_at(end);
    (first.trim_end_matches(['\r', '\n']) == FENCE).then_some(rest)
}

fn parse_fields(path: &Path, yaml: &str) -> Result<Map<String, Value>> {
    let invalid = |message: String| ContentError::FrontMatter {
        path: path.to_path_buf(),
        message,
    };

    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }

    let parsed: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|err| invalid(err.to_string()))?;

    match parsed {
        serde_yaml::Value::Null => Ok(Map::new()),
        serde_yaml::Value::Mapping(mapping) => {
            match serde_json::to_value(mapping).map_err(|err| invalid(err.to_string()))? {
                Value::Object(fields) => Ok(fields),
                _ => Err(invalid("expected a mapping".into())),
            }
        }
        _ => Err(invalid("expected a mapping".into())),
    }
}

/// Render markdown to HTML (tables, strikethrough and task lists enabled).
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Remove the first `<h1 ...>...</h1>` element.
///
/// The document title is carried in metadata, so the rendered body
/// must not repeat it.
pub fn strip_first_heading(html: &str) -> String {
    FIRST_H1.replace(html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn split(raw: &str) -> Result<(Map<String, Value>, &str)> {
        split_front_matter(Path::new("test.md"), raw)
    }

    #[test]
    fn test_split_with_front_matter() {
        let (fields, body) = split("---\ntitle: Hello\ndate: 2024-01-15\n---\n# Hello\n").unwrap();

        assert_eq!(fields["title"], json!("Hello"));
        assert_eq!(fields["date"], json!("2024-01-15"));
        assert_eq!(body, "# Hello\n");
    }

    #[test]
    fn test_split_crlf() {
        let (fields, body) = split("---\r\ntitle: Hello\r\n---\r\nBody").unwrap();
        assert_eq!(fields["title"], json!("Hello"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_without_front_matter() {
        let (fields, body) = split("# Title\n\ntext").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "# Title\n\ntext");
    }

    #[test]
    fn test_split_empty_front_matter() {
        let (fields, body) = split("---\n---\ntext").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "text");
    }

    #[test]
    fn test_split_nested_values() {
        let (fields, _) = split("---\ntags:\n  - rust\n  - web\ndraft: true\n---\n").unwrap();
        assert_eq!(fields["tags"], json!(["rust", "web"]));
        assert_eq!(fields["draft"], json!(true));
    }

    #[test]
    fn test_split_unterminated() {
        let err = split("---\ntitle: Hello\n\nbody").unwrap_err();
        assert!(matches!(err, ContentError::UnterminatedFrontMatter(_)));
    }

    #[test]
    fn test_split_not_a_mapping() {
        let err = split("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_split_malformed_yaml() {
        let err = split("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("# Title\n\nSome *text*.\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Some <em>text</em>.</p>"));
    }

    #[test]
    fn test_render_markdown_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_strip_first_heading_only_first() {
        let html = "<h1>One</h1>\n<p>x</p>\n<h1>Two</h1>\n";
        assert_eq!(strip_first_heading(html), "\n<p>x</p>\n<h1>Two</h1>\n");
    }

    #[test]
    fn test_strip_first_heading_with_attributes() {
        let html = "<h1 id=\"top\">Title</h1><p>x</p>";
        assert_eq!(strip_first_heading(html), "<p>x</p>");
    }

    #[test]
    fn test_strip_first_heading_keeps_h2() {
        let html = "<h2>Sub</h2><p>x</p>";
        assert_eq!(strip_first_heading(html), html);
    }
}
