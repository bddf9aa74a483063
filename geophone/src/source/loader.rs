//! Builds a [`PrefixTable`] from cache or network.

use tracing::{debug, info, warn};

use super::cache::SourceCache;
use super::client::SourceClient;
use super::error::SourceError;
use super::parser::parse_source;
use crate::prefix::PrefixTable;

/// Where a loaded table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrigin {
    /// Parsed records from `table.json`
    TableCache,
    /// Cached raw source text
    RawCache,
    /// Freshly downloaded
    Network,
}

/// A freshly built table and its provenance.
#[derive(Debug)]
pub struct LoadedTable {
    pub table: PrefixTable,
    pub origin: TableOrigin,
}

/// Loads the prefix table, preferring the disk cache over the network.
#[derive(Debug, Clone)]
pub struct TableLoader {
    client: SourceClient,
    cache: SourceCache,
    write_cache: bool,
}

impl TableLoader {
    /// Create a loader that writes fetched data back to the cache.
    pub fn new(client: SourceClient, cache: SourceCache) -> Self {
        Self {
            client,
            cache,
            write_cache: true,
        }
    }

    /// Enable or disable writing to the cache after a load.
    pub fn with_write_cache(mut self, write_cache: bool) -> Self {
        self.write_cache = write_cache;
        self
    }

    /// Build the table.
    ///
    /// Unless `force` is set, a fresh `table.json` is used directly, then a
    /// fresh raw `1.txt`; otherwise the source is downloaded. When cache
    /// writing is enabled, a failure to write is returned as
    /// [`SourceError::Cache`].
    pub async fn load(&self, force: bool) -> Result<LoadedTable, SourceError> {
        // An empty cached table is a miss, same as an empty source.
        if !force
            && let Some(records) = self.cache.load_records().filter(|r| !r.is_empty())
        {
            debug!(records = records.len(), "loaded prefix table from cache");
            return Ok(LoadedTable {
                table: PrefixTable::from_records(records),
                origin: TableOrigin::TableCache,
            });
        }

        let cached_raw = if force { None } else { self.cache.load_raw() };
        let (text, origin) = match cached_raw {
            Some(text) => (text, TableOrigin::RawCache),
            None => (self.client.fetch_text().await?, TableOrigin::Network),
        };

        let parsed = parse_source(&text);
        if parsed.records.is_empty() {
            return Err(SourceError::EmptySource);
        }
        if parsed.skipped > 0 {
            warn!(skipped = parsed.skipped, "skipped malformed source lines");
        }

        if self.write_cache {
            if origin == TableOrigin::Network {
                self.cache.save_raw(&text)?;
            }
            self.cache.save_records(&parsed.records)?;
        }

        let table = PrefixTable::from_records(parsed.records);
        info!(prefixes = table.len(), ?origin, "built prefix table");

        Ok(LoadedTable { table, origin })
    }
}
