//! Page group generation.
//!
//! Emits JSON artifacts for each configured `[[groups]]` entry, reading
//! documents through the content store.
//!
//! # Output Layout
//!
//! ```text
//! [[groups]] name = "blog", source = "blog", output = "blog", listable = true
//!
//! content/blog/welcome.md       ──► public/blog/welcome.json
//! content/blog/posts/intro.md   ──► public/blog/posts/intro.json
//!                                   public/blog/index.json   (listing)
//! ```

use crate::{
    config::{PageGroup, SiteConfig},
    content::{ContentRecord, ContentSource, ContentStore, DOC_EXT, Metadata},
    log,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Listing artifact file name
const LISTING_FILE: &str = "index.json";

/// Generate artifacts for every configured page group.
///
/// Returns the number of files written.
pub fn build_site<S: ContentSource>(config: &SiteConfig, store: &ContentStore<S>) -> Result<usize> {
    if config.groups.is_empty() {
        log!("build"; "no page groups configured");
        return Ok(0);
    }

    let mut written = 0;
    for group in &config.groups {
        written += build_group(group, config, store)
            .with_context(|| format!("failed to build page group `{}`", group.name))?;
    }

    log!("build"; "wrote {written} files to {}", config.build.output.display());
    Ok(written)
}

/// Generate one group. A missing source directory is skipped with a warning.
fn build_group<S: ContentSource>(
    group: &PageGroup,
    config: &SiteConfig,
    store: &ContentStore<S>,
) -> Result<usize> {
    let source = group.source_dir();
    let source_path = config.build.content.join(&source);
    if !source_path.is_dir() {
        log!("warn"; "source directory `{}` for page group `{}` does not exist", source_path.display(), group.name);
        return Ok(0);
    }

    let records = if source.is_empty() {
        store.all_content()?.to_vec()
    } else {
        store.content_by_directory(&source)?
    };

    let out_dir = config.build.output.join(&group.output);
    let pages: Vec<_> = records
        .iter()
        .map(|record| GroupPage::new(group, &source, record))
        .collect();

    pages
        .par_iter()
        .try_for_each(|page| write_json(&out_dir.join(&page.artifact), &page.artifact_body()))?;

    let mut written = pages.len();
    if group.listable {
        write_json(&out_dir.join(LISTING_FILE), &Listing::new(group, &pages))?;
        written += 1;
    }

    log!("build"; "{}: {} pages", group.name, pages.len());
    Ok(written)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

// ============================================================================
// Artifacts
// ============================================================================

/// A record placed inside a group.
struct GroupPage<'a> {
    record: &'a ContentRecord,
    /// Path inside the group source, e.g. `posts/intro.md`
    path: String,
    /// Artifact path relative to the group output directory
    artifact: PathBuf,
    url: String,
}

impl<'a> GroupPage<'a> {
    fn new(group: &PageGroup, source: &str, record: &'a ContentRecord) -> Self {
        let path = if source.is_empty() {
            record.source_path.as_str()
        } else {
            record
                .source_path
                .strip_prefix(source)
                .map_or(record.source_path.as_str(), |rest| rest.trim_start_matches('/'))
        };
        let stem = path.strip_suffix(DOC_EXT).unwrap_or(path);
        let output = group.output.to_string_lossy().replace('\\', "/");

        Self {
            record,
            artifact: PathBuf::from(format!("{stem}.json")),
            url: format!("/{}/{stem}", output.trim_matches('/')),
            path: path.to_owned(),
        }
    }

    fn artifact_body(&self) -> PageArtifact<'a> {
        PageArtifact {
            title: &self.record.metadata.title,
            content: &self.record.body,
            metadata: &self.record.metadata,
        }
    }
}

/// One generated page.
#[derive(Serialize)]
struct PageArtifact<'a> {
    title: &'a str,
    content: &'a str,
    metadata: &'a Metadata,
}

/// Group index written for listable groups.
#[derive(Serialize)]
struct Listing<'a> {
    title: &'a str,
    hierarchical: bool,
    pages: Vec<ListingEntry<'a>>,
}

#[derive(Serialize)]
struct ListingEntry<'a> {
    title: &'a str,
    description: &'a str,
    date: Option<&'a Value>,
    path: &'a str,
    slug: &'a str,
    url: &'a str,
}

impl<'a> Listing<'a> {
    fn new(group: &'a PageGroup, pages: &'a [GroupPage<'a>]) -> Self {
        let title = if group.title.is_empty() {
            group.name.as_str()
        } else {
            group.title.as_str()
        };

        Self {
            title,
            hierarchical: group.hierarchical,
            pages: pages
                .iter()
                .map(|page| ListingEntry {
                    title: &page.record.metadata.title,
                    description: &page.record.metadata.description,
                    date: page.record.metadata.date.as_ref(),
                    path: &page.path,
                    slug: &page.record.slug,
                    url: &page.url,
                })
                .collect(),
        }
    }
}
