//! Content ingestion: turns a directory of markdown documents into a
//! queryable record set.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  query        content_by_url / content_by_directory / sub_directories│
//! │    │                                                                 │
//! │    ▼                                                                 │
//! │  store        ContentStore::all_content()                            │
//! │    │            ├── Production:  cached Arc<Vec<ContentRecord>>      │
//! │    │            └── Development: rescan every call                   │
//! │    ▼                                                                 │
//! │  scanner      DirectoryScanner (walkdir, depth-first)                │
//! │    │                                                                 │
//! │    ├──► markup    front matter (serde_yaml) + markdown (pulldown)    │
//! │    └──► template  {{namespace.key}} expansion                        │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Addressing
//!
//! | Source                       | `url`               | `directory`  | `depth` |
//! |------------------------------|---------------------|--------------|---------|
//! | `content/about.md`           | `/about`            | `root`       | 0       |
//! | `content/blog/welcome.md`    | `/blog/welcome`     | `blog`       | 1       |
//! | `content/blog/posts/intro.md`| `/blog/posts/intro` | `blog/posts` | 2       |

mod error;
mod markup;
mod query;
mod scanner;
mod store;
mod template;
mod types;

pub use query::{DEFAULT_TRUNCATE_LENGTH, truncate_content};
pub use scanner::{ContentSource, DOC_EXT, DirectoryScanner};
pub use store::{CacheMode, ContentStore};
pub use types::{ContentRecord, DirectoryDescriptor, Metadata};
