//! Errors raised while loading `statue.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// Syntax error or unknown key; the TOML error carries line and column.
    #[error("invalid config file `{0}`: {1}")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
