//! Prefix source data: download, parse, disk cache and table loading.
//!
//! The data is libphonenumber's geocoding file for country code 1, a
//! `<digits>|<location>` text format. A downloaded copy and the parsed
//! records are cached on disk so restarts don't hit the network.

mod cache;
mod client;
mod error;
mod loader;
mod parser;

pub use cache::{SourceCache, SourceCacheConfig};
pub use client::{SourceClient, SourceClientConfig};
pub use error::SourceError;
pub use loader::{LoadedTable, TableLoader, TableOrigin};
pub use parser::{ParsedSource, parse_source};
