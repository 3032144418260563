//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::content::DEFAULT_TRUNCATE_LENGTH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Statue content engine CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: statue.toml)
    #[arg(short = 'C', long, default_value = "statue.toml")]
    pub config: PathBuf,

    /// Development mode: rescan content on every read instead of caching
    #[arg(long)]
    pub dev: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List scanned documents, optionally restricted to a directory
    List {
        /// Directory identifier (e.g. `blog`, `blog/posts` or `root`)
        #[arg(short, long)]
        dir: Option<String>,

        /// Maximum excerpt length in characters
        #[arg(short, long, default_value_t = DEFAULT_TRUNCATE_LENGTH)]
        length: usize,
    },

    /// Show the document served at a URL
    Show {
        /// Document URL, e.g. `/blog/hello-world`
        url: String,

        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List top-level content directories, or the subdirectories of DIR
    Dirs {
        /// Directory identifier to list subdirectories for
        dir: Option<String>,
    },

    /// Print the template variables available to documents
    Vars,

    /// Generate page group artifacts into the output directory
    Build {
        /// Output directory path (relative to project root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
