//! Record types produced by a content scan.
//!
//! These types are serialized to JSON by the generator and `statue show --json`.

use super::query::format_title;
use serde::Serialize;
use serde_json::{Map, Value};

/// Directory identifier used for documents placed directly in the content root.
pub const ROOT_DIRECTORY: &str = "root";

/// One scanned document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// File stem, e.g. `intro` for `blog/posts/intro.md`
    pub slug: String,

    /// Path relative to the content root, `/`-separated
    pub source_path: String,

    /// Canonical address, e.g. `/blog/posts/intro`
    pub url: String,

    /// Relative directory, or [`ROOT_DIRECTORY`] for root-level documents
    pub directory: String,

    /// First segment of `directory`, or [`ROOT_DIRECTORY`]
    pub main_directory: String,

    /// Number of segments in `directory` (0 for root-level documents)
    pub depth: usize,

    /// Rendered HTML with the first `<h1>` removed
    pub body: String,

    pub metadata: Metadata,
}

impl ContentRecord {
    /// Whether the document sits directly in the content root.
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Document metadata: the known fields plus any author-supplied extras.
///
/// Serializes as one flat object: the known fields, then the extras in
/// front-matter order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub date: Option<Value>,
    pub author: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    /// Merge parsed front matter over the defaults.
    ///
    /// A field present in `fields` wins; an absent or `null` field takes
    /// the default (`title` derives from `slug`).
    pub fn merge(slug: &str, mut fields: Map<String, Value>) -> Self {
        let title = take_text(&mut fields, "title").unwrap_or_else(|| format_title(slug));
        let description = take_text(&mut fields, "description").unwrap_or_default();
        let date = take_value(&mut fields, "date");
        let author = take_value(&mut fields, "author");

        Self {
            title,
            description,
            date,
            author,
            extra: fields,
        }
    }

    /// Look up any field by name, known or extra.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "title" => Some(Value::String(self.title.clone())),
            "description" => Some(Value::String(self.description.clone())),
            "date" => self.date.clone(),
            "author" => self.author.clone(),
            _ => self.extra.get(key).cloned(),
        }
    }
}

fn take_value(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.shift_remove(key).filter(|value| !value.is_null())
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    take_value(fields, key).map(|value| match value {
        Value::String(text) => text,
        other => other.to_string(),
    })
}

/// A content directory, addressable by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryDescriptor {
    /// Last path segment
    pub name: String,
    /// Path relative to the content root, `/`-separated
    pub path: String,
    pub title: String,
    pub url: String,
}

impl DirectoryDescriptor {
    /// Describe the directory at `path` (relative to the content root).
    pub fn new(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_owned();
        Self {
            title: format_title(&name),
            url: format!("/{path}"),
            path: path.to_owned(),
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_merge_defaults() {
        let meta = Metadata::merge("hello-world", Map::new());

        assert_eq!(meta.title, "Hello World");
        assert_eq!(meta.description, "");
        assert_eq!(meta.date, None);
        assert_eq!(meta.author, None);
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_merge_author_fields_win() {
        let meta = Metadata::merge(
            "intro",
            fields(json!({
                "title": "Welcome",
                "description": "First post",
                "date": "2024-01-15",
                "author": "Ada",
                "tags": ["rust", "web"],
            })),
        );

        assert_eq!(meta.title, "Welcome");
        assert_eq!(meta.description, "First post");
        assert_eq!(meta.date, Some(json!("2024-01-15")));
        assert_eq!(meta.author, Some(json!("Ada")));
        assert_eq!(meta.extra["tags"], json!(["rust", "web"]));
        assert!(!meta.extra.contains_key("title"));
    }

    #[test]
    fn test_merge_null_falls_back() {
        let meta = Metadata::merge("about-us", fields(json!({ "title": null, "author": null })));
        assert_eq!(meta.title, "About Us");
        assert_eq!(meta.author, None);
    }

    #[test]
    fn test_merge_empty_title_is_kept() {
        let meta = Metadata::merge("about", fields(json!({ "title": "" })));
        assert_eq!(meta.title, "");
    }

    #[test]
    fn test_merge_non_string_title() {
        let meta = Metadata::merge("year", fields(json!({ "title": 2024 })));
        assert_eq!(meta.title, "2024");
    }

    #[test]
    fn test_metadata_serializes_flat() {
        let meta = Metadata::merge("intro", fields(json!({ "draft": true })));
        let value = serde_json::to_value(&meta).unwrap();

        assert_eq!(
            value,
            json!({
                "title": "Intro",
                "description": "",
                "date": null,
                "author": null,
                "draft": true,
            })
        );
    }

    #[test]
    fn test_merge_preserves_extra_order() {
        let mut fields = Map::new();
        fields.insert("zeta".into(), json!(1));
        fields.insert("title".into(), json!("T"));
        fields.insert("alpha".into(), json!(2));
        fields.insert("mid".into(), json!(3));

        let meta = Metadata::merge("t", fields);
        let keys: Vec<_> = meta.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_metadata_get() {
        let meta = Metadata::merge("intro", fields(json!({ "author": "Ada", "draft": true })));
        assert_eq!(meta.get("title"), Some(json!("Intro")));
        assert_eq!(meta.get("author"), Some(json!("Ada")));
        assert_eq!(meta.get("draft"), Some(json!(true)));
        assert_eq!(meta.get("date"), None);
    }

    #[test]
    fn test_directory_descriptor() {
        let top = DirectoryDescriptor::new("getting-started");
        assert_eq!(top.name, "getting-started");
        assert_eq!(top.path, "getting-started");
        assert_eq!(top.title, "Getting Started");
        assert_eq!(top.url, "/getting-started");

        let nested = DirectoryDescriptor::new("blog/release-notes");
        assert_eq!(nested.name, "release-notes");
        assert_eq!(nested.path, "blog/release-notes");
        assert_eq!(nested.url, "/blog/release-notes");
    }
}
