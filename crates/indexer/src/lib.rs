//! # appdex Indexer
//!
//! Application indexing for name-based launching.
//!
//! ## Pipeline
//!
//! ```text
//! Scan roots (ordered, rank = priority)
//!     │
//!     ├──> Scanner (extension / exec-bit candidates, exclusion rules)
//!     │      └─> key → path pairs, duplicates resolved by priority
//!     │
//!     ├──> Seeds (custom overrides + OS builtins, never overwritten)
//!     │
//!     └──> Index Store (JSON cache, load-or-rebuild, atomic persist)
//!            └─> AppIndex snapshot
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use appdex_indexer::{IndexStore, ScanConfig};
//!
//! fn main() -> appdex_indexer::Result<()> {
//!     let store = IndexStore::new(ScanConfig::default(), "app_index.json");
//!     let index = store.load()?;
//!     println!("{} launchable apps", index.len());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod ranker;
mod scanner;
mod store;

pub use config::ScanConfig;
pub use error::{IndexerError, Result};
pub use ranker::priority_score;
pub use scanner::scan;
pub use store::{AppIndex, IndexStore, SharedIndex, INDEX_SCHEMA_VERSION};
