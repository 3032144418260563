//! Recursive discovery of `.md` documents under the content root.
//!
//! # Pipeline (per document)
//!
//! ```text
//! read UTF-8 ──► split front matter ──► expand placeholders ──► merge defaults
//!                                       (body + string fields)        │
//!                                                                     ▼
//!                          strip first <h1> ◄── render markdown ◄── ContentRecord
//! ```

use super::error::{ContentError, Result};
use super::markup::{render_markdown, split_front_matter, strip_first_heading};
use super::template::{Clock, SystemClock, VariableTable};
use super::types::{ContentRecord, DirectoryDescriptor, Metadata, ROOT_DIRECTORY};
use crate::config::SiteConfig;
use crate::log;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Document file extension
pub const DOC_EXT: &str = ".md";

/// Where a store gets its records from.
///
/// [`DirectoryScanner`] reads the filesystem; tests substitute counting doubles.
pub trait ContentSource {
    /// Produce every record, in traversal order.
    fn scan(&self) -> Result<Vec<ContentRecord>>;

    /// Immediate child directories of the content root.
    fn directories(&self) -> Result<Vec<DirectoryDescriptor>>;
}

/// Walks a content root and turns each `.md` file into a [`ContentRecord`].
pub struct DirectoryScanner {
    root: PathBuf,
    /// Configuration-derived variables; `date.*` entries are added per document
    variables: VariableTable,
    clock: Box<dyn Clock>,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>, config: &SiteConfig) -> Self {
        Self {
            root: root.into(),
            variables: VariableTable::from_config(config),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for `date.*` variables.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Variables for one substitution pass, with fresh `date.*` entries.
    pub fn variable_table(&self) -> VariableTable {
        let mut table = self.variables.clone();
        table.insert_dates(self.clock.today());
        table
    }

    /// Read and assemble a single document.
    fn read_document(&self, path: &Path) -> Result<ContentRecord> {
        let relative = normalize_separators(path.strip_prefix(&self.root).unwrap_or(path));
        let bytes = fs::read(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
        let raw = String::from_utf8(bytes).map_err(|_| ContentError::Utf8(path.to_path_buf()))?;

        let (fields, markdown) = split_front_matter(path, &raw)?;
        let location = Location::from_relative(&relative);
        let vars = self.variable_table();

        let markdown = expand_logged(&vars, &relative, markdown);
        let fields = fields
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(text) => (key, Value::String(expand_logged(&vars, &relative, &text))),
                other => (key, other),
            })
            .collect();

        Ok(ContentRecord {
            metadata: Metadata::merge(&location.slug, fields),
            body: strip_first_heading(&render_markdown(&markdown)),
            slug: location.slug,
            source_path: relative,
            url: location.url,
            directory: location.directory,
            main_directory: location.main_directory,
            depth: location.depth,
        })
    }

    fn root_missing(&self) -> bool {
        if self.root.exists() {
            return false;
        }
        log!("warn"; "content root `{}` not found", self.root.display());
        true
    }
}

impl ContentSource for DirectoryScanner {
    fn scan(&self) -> Result<Vec<ContentRecord>> {
        if self.root_missing() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).follow_links(true) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(&self.root).to_path_buf();
                ContentError::Io(path, err.into())
            })?;

            if entry.file_type().is_file() && is_document(entry.file_name()) {
                records.push(self.read_document(entry.path())?);
            }
        }

        log!("content"; "scanned {} documents", records.len());
        Ok(records)
    }

    fn directories(&self) -> Result<Vec<DirectoryDescriptor>> {
        if self.root_missing() {
            return Ok(Vec::new());
        }

        let io_err = |err: std::io::Error| ContentError::Io(self.root.clone(), err);
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if entry.path().is_dir() {
                dirs.push(DirectoryDescriptor::new(&entry.file_name().to_string_lossy()));
            }
        }
        Ok(dirs)
    }
}

/// Expand placeholders, logging each unknown key.
fn expand_logged(vars: &VariableTable, relative: &str, input: &str) -> String {
    let expansion = vars.expand(input);
    for key in &expansion.unknown {
        log!("warn"; "template variable not found: `{key}` in {relative}");
    }
    expansion.text
}

/// `*.md` with a non-empty stem; a bare `.md` would have no slug.
fn is_document(name: &OsStr) -> bool {
    name.to_str()
        .and_then(|name| name.strip_suffix(DOC_EXT))
        .is_some_and(|stem| !stem.is_empty())
}

/// Join path components with `/` regardless of platform.
fn normalize_separators(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Address fields derived from a document's relative path.
#[derive(Debug, PartialEq, Eq)]
struct Location {
    slug: String,
    url: String,
    directory: String,
    main_directory: String,
    depth: usize,
}

impl Location {
    /// `relative` is `/`-separated, e.g. `blog/posts/intro.md`.
    fn from_relative(relative: &str) -> Self {
        let (dir, file) = relative.rsplit_once('/').unwrap_or(("", relative));
        let slug = file.strip_suffix(DOC_EXT).unwrap_or(file).to_owned();

        if dir.is_empty() {
            return Self {
                url: format!("/{slug}"),
                slug,
                directory: ROOT_DIRECTORY.to_owned(),
                main_directory: ROOT_DIRECTORY.to_owned(),
                depth: 0,
            };
        }

        Self {
            url: format!("/{dir}/{slug}"),
            slug,
            directory: dir.to_owned(),
            main_directory: dir.split('/').next().unwrap_or(dir).to_owned(),
            depth: dir.split('/').count(),
        }
    }
}
