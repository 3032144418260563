//! `[build]` section and `[[groups]]` page group configuration.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::path::PathBuf;

/// `[build]` section in statue.toml - content and output locations.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Content root scanned for `.md` files
/// output = "public"        # Generator output directory
/// dev = true               # Always rescan (disables the content cache)
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content root directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for generated page group artifacts.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Cache mode override. `None` defers to the `STATUE_ENV` variable.
    pub dev: Option<bool>,
}

/// A `[[groups]]` entry - one named page group for the generator.
///
/// # Example
/// ```toml
/// [[groups]]
/// name = "blog"
/// title = "Blog"
/// source = "blog"          # Directory under the content root
/// output = "blog"          # Directory under [build].output
/// listable = true
/// hierarchical = false
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PageGroup {
    /// Unique group identifier.
    pub name: String,

    /// Title used by the listing artifact.
    #[serde(default)]
    pub title: String,

    /// Source directory, relative to the content root.
    pub source: PathBuf,

    /// Output directory, relative to `[build].output`.
    pub output: PathBuf,

    /// Emit an `index.json` listing for this group.
    #[serde(default = "defaults::group::listable")]
    #[educe(Default = defaults::group::listable())]
    pub listable: bool,

    /// Hint for listing renderers to group pages by subdirectory.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub hierarchical: bool,
}

impl PageGroup {
    /// Group source as a `/`-separated directory identifier.
    pub fn source_dir(&self) -> String {
        self.source
            .to_string_lossy()
            .replace('\\', "/")
            .trim_matches('/')
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.dev, None);
        assert!(config.groups.is_empty());
    }

    #[test]
    fn test_build_dev_flag() {
        let config: SiteConfig = toml::from_str("[build]\ndev = true\n").unwrap();
        assert_eq!(config.build.dev, Some(true));
    }

    #[test]
    fn test_page_groups() {
        let config: SiteConfig = toml::from_str(
            r#"
            [[groups]]
            name = "blog"
            title = "Blog"
            source = "blog"
            output = "blog"

            [[groups]]
            name = "docs"
            source = "docs/"
            output = "documentation"
            listable = false
            hierarchical = true
        "#,
        )
        .unwrap();

        assert_eq!(config.groups.len(), 2);
        assert!(config.groups[0].listable);
        assert!(!config.groups[0].hierarchical);
        assert!(!config.groups[1].listable);
        assert!(config.groups[1].hierarchical);
        assert_eq!(config.groups[1].source_dir(), "docs");
    }

    #[test]
    fn test_page_group_requires_source() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [[groups]]
            name = "blog"
            output = "blog"
        "#,
        );
        assert!(result.is_err());
    }
}
