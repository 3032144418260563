//! Content store with an environment-gated cache.
//!
//! # Cache Modes
//!
//! | Mode          | `all_content()`                                 |
//! |---------------|-------------------------------------------------|
//! | `Development` | always rescans, never touches the cache         |
//! | `Production`  | scans once, serves the cached set until cleared |
//!
//! Invalidation is all-or-nothing: [`ContentStore::clear_content_cache`]
//! drops the whole record set. A failed scan leaves the cache untouched.

use super::error::Result;
use super::scanner::{ContentSource, DirectoryScanner};
use super::types::ContentRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cached record set, shared with callers.
pub type Records = Arc<Vec<ContentRecord>>;

/// How the store treats its cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Rescan on every read.
    Development,
    /// Scan once and cache.
    #[default]
    Production,
}

impl CacheMode {
    /// Environment variable selecting the mode.
    pub const ENV_VAR: &'static str = "STATUE_ENV";

    /// Read the mode from [`Self::ENV_VAR`].
    pub fn detect() -> Self {
        Self::from_env_value(std::env::var(Self::ENV_VAR).ok().as_deref())
    }

    /// `development` or `dev` (any case) selects development mode.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("development") || v.eq_ignore_ascii_case("dev") => {
                Self::Development
            }
            _ => Self::Production,
        }
    }
}

/// Owner of the authoritative record set.
///
/// # Thread Safety
///
/// The cache sits behind a `RwLock`: concurrent readers share the cached
/// `Arc`, and the first production read holds the write lock while it scans
/// so only one scan populates the cache.
pub struct ContentStore<S = DirectoryScanner> {
    source: S,
    mode: CacheMode,
    cache: RwLock<Option<Records>>,
}

impl<S: ContentSource> ContentStore<S> {
    pub fn new(source: S, mode: CacheMode) -> Self {
        Self {
            source,
            mode,
            cache: RwLock::new(None),
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the current record set, scanning when required by the mode.
    pub fn all_content(&self) -> Result<Records> {
        if self.mode == CacheMode::Development {
            return self.source.scan().map(Arc::new);
        }

        // Fast path: cached (read lock only)
        if let Some(records) = self.cache.read().as_ref() {
            return Ok(Arc::clone(records));
        }

        let mut cache = self.cache.write();
        // Double-check after acquiring write lock
        if let Some(records) = cache.as_ref() {
            return Ok(Arc::clone(records));
        }

        let records = Arc::new(self.source.scan()?);
        *cache = Some(Arc::clone(&records));
        Ok(records)
    }

    /// Discard the cached record set.
    pub fn clear_content_cache(&self) {
        *self.cache.write() = None;
    }

    /// Whether a record set is currently cached.
    #[cfg(test)]
    pub fn is_cached(&self) -> bool {
        self.cache.read().is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::error::ContentError;
    use crate::content::types::{DirectoryDescriptor, Metadata};
    use serde_json::Map;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Record with the fields the scanner derives for `url` in `directory`.
    pub(crate) fn record(url: &str, directory: &str) -> ContentRecord {
        let slug = url.rsplit('/').next().unwrap_or_default().to_owned();
        let depth = if directory == "root" { 0 } else { directory.split('/').count() };
        ContentRecord {
            metadata: Metadata::merge(&slug, Map::new()),
            source_path: format!("{}.md", url.trim_start_matches('/')),
            main_directory: directory.split('/').next().unwrap_or("root").to_owned(),
            directory: directory.to_owned(),
            url: url.to_owned(),
            body: String::new(),
            depth,
            slug,
        }
    }

    /// Source double that counts scans and can be told to fail.
    #[derive(Default)]
    pub(crate) struct CountingSource {
        pub records: Vec<ContentRecord>,
        pub scans: AtomicUsize,
        pub fail: AtomicBool,
    }

    impl CountingSource {
        pub(crate) fn with(records: Vec<ContentRecord>) -> Self {
            Self {
                records,
                ..Self::default()
            }
        }

        pub(crate) fn scans(&self) -> usize {
            self.scans.load(Ordering::SeqCst)
        }
    }

    impl ContentSource for CountingSource {
        fn scan(&self) -> Result<Vec<ContentRecord>> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ContentError::UnterminatedFrontMatter(PathBuf::from("bad.md")));
            }
            Ok(self.records.clone())
        }

        fn directories(&self) -> Result<Vec<DirectoryDescriptor>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_cache_mode_from_env_value() {
        assert_eq!(CacheMode::from_env_value(Some("development")), CacheMode::Development);
        assert_eq!(CacheMode::from_env_value(Some(" DEV ")), CacheMode::Development);
        assert_eq!(CacheMode::from_env_value(Some("production")), CacheMode::Production);
        assert_eq!(CacheMode::from_env_value(Some("")), CacheMode::Production);
        assert_eq!(CacheMode::from_env_value(None), CacheMode::Production);
    }

    #[test]
    fn test_production_scans_once() {
        let store = ContentStore::new(
            CountingSource::with(vec![record("/about", "root")]),
            CacheMode::Production,
        );

        let first = store.all_content().unwrap();
        let second = store.all_content().unwrap();

        assert_eq!(store.source().scans(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(store.is_cached());
    }

    #[test]
    fn test_development_always_rescans() {
        let store = ContentStore::new(CountingSource::default(), CacheMode::Development);

        store.all_content().unwrap();
        store.all_content().unwrap();

        assert_eq!(store.source().scans(), 2);
        assert!(!store.is_cached());
    }

    #[test]
    fn test_clear_forces_rescan() {
        let store = ContentStore::new(CountingSource::default(), CacheMode::Production);

        store.all_content().unwrap();
        store.clear_content_cache();
        assert!(!store.is_cached());

        store.all_content().unwrap();
        assert_eq!(store.source().scans(), 2);
    }

    #[test]
    fn test_failed_scan_does_not_poison_cache() {
        let store = ContentStore::new(CountingSource::default(), CacheMode::Production);
        store.source().fail.store(true, Ordering::SeqCst);

        assert!(store.all_content().is_err());
        assert!(!store.is_cached());

        store.source().fail.store(false, Ordering::SeqCst);
        assert!(store.all_content().is_ok());
        assert!(store.is_cached());
        assert_eq!(store.source().scans(), 2);
    }

    #[test]
    fn test_clear_then_rescan_sees_new_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.md"), "one").unwrap();

        let scanner = DirectoryScanner::new(dir.path(), &SiteConfig::default());
        let store = ContentStore::new(scanner, CacheMode::Production);
        assert_eq!(store.all_content().unwrap().len(), 1);

        fs::write(dir.path().join("second.md"), "two").unwrap();
        // Still served from cache
        assert_eq!(store.all_content().unwrap().len(), 1);

        store.clear_content_cache();
        let records = store.all_content().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.url == "/second"));
    }
}
