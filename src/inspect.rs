//! Read-only inspection commands: `list`, `show`, `dirs` and `vars`.

use crate::{
    content::{ContentRecord, ContentStore, DirectoryDescriptor, truncate_content},
    log,
};
use anyhow::{Result, bail};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Print every record, or the records under `dir`.
pub fn list(store: &ContentStore, dir: Option<&str>, length: usize) -> Result<()> {
    let records = match dir {
        Some(dir) => store.content_by_directory(dir)?,
        None => store.all_content()?.to_vec(),
    };

    for record in &records {
        println!("{}  {}", record.url, record.metadata.title);
        let excerpt = excerpt(record, length);
        if !excerpt.is_empty() {
            println!("    {excerpt}");
        }
    }

    log!("content"; "{} documents", records.len());
    Ok(())
}

/// Print the record served at `url`.
pub fn show(store: &ContentStore, url: &str, json: bool) -> Result<()> {
    let Some(record) = store.content_by_url(url)? else {
        bail!("no document found at `{url}`");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("title        {}", record.metadata.title);
    println!("url          {}", record.url);
    println!("source       {}", record.source_path);
    if !record.is_root() {
        println!("directory    {}", record.directory);
    }
    for key in ["description", "date", "author"] {
        match record.metadata.get(key) {
            Some(Value::String(text)) if text.is_empty() => {}
            Some(Value::String(text)) => println!("{key:<12} {text}"),
            Some(value) => println!("{key:<12} {value}"),
            None => {}
        }
    }
    for (key, value) in &record.metadata.extra {
        println!("{key:<12} {value}");
    }
    println!();
    println!("{}", record.body);
    Ok(())
}

/// Print top-level directories, or the subdirectories of `dir`.
pub fn dirs(store: &ContentStore, dir: Option<&str>) -> Result<()> {
    let dirs = match dir {
        Some(dir) => store.sub_directories(dir)?,
        None => store.content_directories()?,
    };

    for dir in &dirs {
        print_directory(dir);
    }
    Ok(())
}

/// Print the variables a document scanned now would see.
pub fn vars(store: &ContentStore) {
    for (key, value) in store.source().variable_table().iter() {
        println!("{key} = {value}");
    }
}

fn print_directory(dir: &DirectoryDescriptor) {
    println!("{:<24} {:<24} {}", dir.path, dir.title, dir.url);
}

/// Description if present, otherwise the body with markup removed.
fn excerpt(record: &ContentRecord, length: usize) -> String {
    let text = if record.metadata.description.is_empty() {
        plain_text(&record.body)
    } else {
        record.metadata.description.clone()
    };
    truncate_content(&text, length)
}

fn plain_text(html: &str) -> String {
    HTML_TAG
        .replace_all(html, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Metadata;
    use serde_json::Map;

    fn record(description: &str, body: &str) -> ContentRecord {
        let mut fields = Map::new();
        fields.insert("description".into(), description.into());
        ContentRecord {
            slug: "intro".into(),
            source_path: "blog/intro.md".into(),
            url: "/blog/intro".into(),
            directory: "blog".into(),
            main_directory: "blog".into(),
            depth: 1,
            body: body.into(),
            metadata: Metadata::merge("intro", fields),
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            plain_text("<p>Hello <em>there</em></p>\n<p>friend</p>\n"),
            "Hello there friend"
        );
    }

    #[test]
    fn test_excerpt_prefers_description() {
        let record = record("Short summary", "<p>Long body</p>");
        assert_eq!(excerpt(&record, 200), "Short summary");
    }

    #[test]
    fn test_excerpt_falls_back_to_body() {
        let record = record("", "<p>abcdefgh</p>");
        assert_eq!(excerpt(&record, 4), "abcd...");
    }
}
