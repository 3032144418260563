//! Read-only lookups over the current record set.
//!
//! The slice functions are pure; the `ContentStore` methods fetch the
//! record set through [`ContentStore::all_content`] and delegate to them.

use super::error::Result;
use super::scanner::ContentSource;
use super::store::ContentStore;
use super::types::{ContentRecord, DirectoryDescriptor, ROOT_DIRECTORY};
use std::collections::HashSet;

/// Default length for [`truncate_content`].
pub const DEFAULT_TRUNCATE_LENGTH: usize = 200;

/// Appended to truncated text.
const TRUNCATION_MARKER: &str = "...";

// ============================================================================
// Text helpers
// ============================================================================

/// `hello-world` → `Hello World`.
pub fn format_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Cut `text` to `max_length` characters, appending `...` when cut.
pub fn truncate_content(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((end, _)) => format!("{}{TRUNCATION_MARKER}", &text[..end]),
        None => text.to_owned(),
    }
}

fn trim_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

// ============================================================================
// Record set queries
// ============================================================================

/// First record whose URL matches, ignoring one trailing `/` on either side.
pub fn find_by_url<'a>(records: &'a [ContentRecord], url: &str) -> Option<&'a ContentRecord> {
    let url = trim_trailing_slash(url);
    records
        .iter()
        .find(|record| trim_trailing_slash(&record.url) == url)
}

/// Records in `directory` or any of its descendants.
///
/// `root` matches root-level documents only.
pub fn filter_by_directory<'a>(
    records: &'a [ContentRecord],
    directory: &str,
) -> Vec<&'a ContentRecord> {
    if directory == ROOT_DIRECTORY {
        return records
            .iter()
            .filter(|record| record.directory == ROOT_DIRECTORY)
            .collect();
    }

    let prefix = format!("{directory}/");
    records
        .iter()
        .filter(|record| record.directory == directory || record.directory.starts_with(&prefix))
        .collect()
}

/// Distinct first-level children of `directory` that contain documents.
///
/// Order follows the first record seen under each child.
pub fn sub_directories(records: &[ContentRecord], directory: &str) -> Vec<DirectoryDescriptor> {
    let directory = directory.trim_matches('/');
    let prefix = format!("{directory}/");
    let mut seen = HashSet::new();

    records
        .iter()
        .filter(|record| record.directory != ROOT_DIRECTORY)
        .filter_map(|record| record.directory.strip_prefix(&prefix))
        .filter_map(|rest| rest.split('/').next())
        .filter(|child| !child.is_empty() && seen.insert(*child))
        .map(|child| DirectoryDescriptor::new(&format!("{prefix}{child}")))
        .collect()
}

// ============================================================================
// Store API
// ============================================================================

impl<S: ContentSource> ContentStore<S> {
    /// Immediate child directories of the content root, read from disk.
    pub fn content_directories(&self) -> Result<Vec<DirectoryDescriptor>> {
        self.source().directories()
    }

    pub fn content_by_url(&self, url: &str) -> Result<Option<ContentRecord>> {
        let records = self.all_content()?;
        Ok(find_by_url(&records, url).cloned())
    }

    pub fn content_by_directory(&self, directory: &str) -> Result<Vec<ContentRecord>> {
        let records = self.all_content()?;
        Ok(filter_by_directory(&records, directory)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn sub_directories(&self, directory: &str) -> Result<Vec<DirectoryDescriptor>> {
        let records = self.all_content()?;
        Ok(sub_directories(&records, directory))
    }
}
