//! Site configuration management for `statue.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | `[site]`      | Site metadata (name, description, url, author) |
//! | `[contact]`   | Contact emails, phone and postal address       |
//! | `[social]`    | Social profile links                           |
//! | `[legal]`     | Legal page dates and notices                   |
//! | `[build]`     | Content root, output directory, cache mode     |
//! | `[[groups]]`  | Page groups emitted by `statue build`          |
//! | `[extra]`     | User-defined template variables                |
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Statue SSG"
//! url = "https://statuessg.com"
//!
//! [contact]
//! email = "hello@statuessg.com"
//!
//! [build]
//! content = "content"
//!
//! [[groups]]
//! name = "blog"
//! source = "blog"
//! output = "blog"
//!
//! [extra]
//! support_hours = "9-5 PST"
//! ```

mod build;
pub mod defaults;
mod error;
mod site;

pub use build::PageGroup;

use build::BuildConfig;
use error::ConfigError;
use site::{ContactConfig, LegalConfig, SiteInfo, SocialConfig};

use crate::cli::{Cli, Commands};
use crate::content::CacheMode;
use crate::log;
use anyhow::{Result, bail};
use educe::Educe;
use serde::Deserialize;
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing statue.toml
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Basic site information
    #[serde(default)]
    pub site: SiteInfo,

    /// Contact information
    #[serde(default)]
    pub contact: ContactConfig,

    /// Social media links
    #[serde(default)]
    pub social: SocialConfig,

    /// Legal page settings
    #[serde(default)]
    pub legal: LegalConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Page groups for the generator
    #[serde(default)]
    pub groups: Vec<PageGroup>,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let config =
            Self::from_str(&content).map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;
        Ok(config)
    }

    /// Load configuration for the given CLI invocation.
    ///
    /// A missing config file falls back to defaults with a warning.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            log!("warn"; "config file `{}` not found, using defaults", config_path.display());
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Resolve the content cache mode.
    ///
    /// Precedence: `--dev` flag, then `[build].dev`, then `STATUE_ENV`.
    pub fn cache_mode(&self) -> CacheMode {
        if self.cli.is_some_and(|cli| cli.dev) {
            return CacheMode::Development;
        }
        match self.build.dev {
            Some(true) => CacheMode::Development,
            Some(false) => CacheMode::Production,
            None => CacheMode::detect(),
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        if let Commands::Build { output } = &cli.command {
            Self::update_option(&mut self.build.output, output.as_ref());
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(&Self::expand_tilde(root));
        self.set_root(&root);

        self.build.content = Self::normalize_path(&root.join(Self::expand_tilde(&self.build.content)));
        self.build.output = Self::normalize_path(&root.join(Self::expand_tilde(&self.build.output)));
    }

    /// Expand a leading `~` to the home directory.
    fn expand_tilde(path: &Path) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let url = &self.site.url;
        if !url.is_empty() && !url.starts_with("http") {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        let mut names = HashSet::new();
        for group in &self.groups {
            if group.name.is_empty() {
                bail!(ConfigError::Validation("[[groups]] name must not be empty".into()));
            }
            if !names.insert(group.name.as_str()) {
                bail!(ConfigError::Validation(format!(
                    "duplicate page group `{}`",
                    group.name
                )));
            }
            if group.source.is_absolute() {
                bail!(ConfigError::Validation(format!(
                    "[[groups]] `{}`: source must be relative to the content root",
                    group.name
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
