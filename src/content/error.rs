//! Content scanning error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a content scan.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not valid UTF-8")]
    Utf8(PathBuf),

    #[error("invalid front matter in `{path}`: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("front matter in `{0}` is not closed by `---`")]
    UnterminatedFrontMatter(PathBuf),
}

pub type Result<T> = std::result::Result<T, ContentError>;
