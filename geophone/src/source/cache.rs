//! Disk cache for the prefix source.
//!
//! Two files live in the cache directory: the raw source text (`1.txt`) and
//! the parsed records (`table.json`). Either one older than the TTL is
//! treated as missing.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::SourceError;
use crate::prefix::PrefixRecord;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const RAW_FILE: &str = "1.txt";
const TABLE_FILE: &str = "table.json";

/// Cached records with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedTable {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// The parsed records.
    records: Vec<PrefixRecord>,
}

/// Configuration for the source disk cache.
#[derive(Debug, Clone)]
pub struct SourceCacheConfig {
    /// Directory holding the cache files.
    pub dir: PathBuf,
    /// How long cached files remain valid.
    pub ttl: Duration,
}

impl SourceCacheConfig {
    /// Create a new cache config with the given directory and default TTL (24 hours).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for SourceCacheConfig {
    fn default() -> Self {
        Self::new("cache")
    }
}

/// Disk cache for the raw source and the parsed table.
#[derive(Debug, Clone)]
pub struct SourceCache {
    config: SourceCacheConfig,
}

impl SourceCache {
    /// Create a new source cache with the given config.
    pub fn new(config: SourceCacheConfig) -> Self {
        Self { config }
    }

    /// Path of the cached raw source text.
    pub fn raw_path(&self) -> PathBuf {
        self.config.dir.join(RAW_FILE)
    }

    /// Path of the cached parsed records.
    pub fn table_path(&self) -> PathBuf {
        self.config.dir.join(TABLE_FILE)
    }

    /// Try to load parsed records from the cache.
    ///
    /// Returns `None` if the file doesn't exist, is invalid, or has expired.
    pub fn load_records(&self) -> Option<Vec<PrefixRecord>> {
        let contents = std::fs::read_to_string(self.table_path()).ok()?;
        let cached: CachedTable = match serde_json::from_str(&contents) {
            Ok(cached) => cached,
            Err(e) => {
                debug!(error = %e, "ignoring corrupt table cache");
                return None;
            }
        };

        let age_secs = unix_now().ok()?.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            debug!(age_secs, "table cache expired");
            return None;
        }

        Some(cached.records)
    }

    /// Try to load the raw source text from the cache.
    ///
    /// Freshness is judged from the file's modification time.
    pub fn load_raw(&self) -> Option<String> {
        let path = self.raw_path();
        let modified = std::fs::metadata(&path).ok()?.modified().ok()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= self.config.ttl {
            debug!(age_secs = age.as_secs(), "raw source cache expired");
            return None;
        }

        std::fs::read_to_string(path).ok()
    }

    /// Save parsed records to the cache.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn save_records(&self, records: &[PrefixRecord]) -> Result<(), SourceError> {
        let cached = CachedTable {
            cached_at_secs: unix_now()?,
            records: records.to_vec(),
        };

        let json = serde_json::to_string(&cached).map_err(|e| SourceError::Cache {
            message: format!("failed to serialize table cache: {}", e),
        })?;

        self.write(&self.table_path(), &json)
    }

    /// Save the raw source text to the cache.
    pub fn save_raw(&self, text: &str) -> Result<(), SourceError> {
        self.write(&self.raw_path(), text)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), SourceError> {
        let dir = &self.config.dir;
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| SourceError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        std::fs::write(path, contents).map_err(|e| SourceError::Cache {
            message: format!("failed to write {}: {}", path.display(), e),
        })
    }
}

fn unix_now() -> Result<u64, SourceError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| SourceError::Cache {
            message: "system time before unix epoch".to_string(),
        })
}
