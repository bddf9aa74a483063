//! Process-wide phone location directory.
//!
//! Owns the loaded [`PrefixTable`] and hands out shared read-only handles to
//! it. The table is built on first use; concurrent first callers wait for a
//! single build rather than racing their own.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::prefix::PrefixTable;
use crate::resolver;
use crate::source::{SourceError, TableLoader, TableOrigin};

/// The currently installed table and when it was loaded.
#[derive(Debug, Clone)]
struct Snapshot {
    table: Arc<PrefixTable>,
    origin: TableOrigin,
    loaded_at: DateTime<Utc>,
}

/// Owned result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The normalized digits of the queried number
    pub digits: String,
    /// Longest table prefix of `digits`
    pub prefix: String,
    pub location: String,
}

/// Summary of the installed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStatus {
    pub prefixes: usize,
    pub origin: TableOrigin,
    pub loaded_at: DateTime<Utc>,
}

/// Thread-safe phone → location lookup.
///
/// Cheap to clone; clones share the same table.
#[derive(Clone)]
pub struct GeoDirectory {
    inner: Arc<RwLock<Option<Snapshot>>>,
    loader: TableLoader,
}

impl GeoDirectory {
    /// Create a directory. Nothing is loaded until first use.
    pub fn new(loader: TableLoader) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            loader,
        }
    }

    /// The current table, building it on first use.
    pub async fn table(&self) -> Result<Arc<PrefixTable>, SourceError> {
        if let Some(snapshot) = self.inner.read().await.as_ref() {
            return Ok(Arc::clone(&snapshot.table));
        }

        let mut guard = self.inner.write().await;
        // Another caller may have finished the build while we waited.
        if let Some(snapshot) = guard.as_ref() {
            return Ok(Arc::clone(&snapshot.table));
        }

        debug!("building prefix table on first use");
        let loaded = self.loader.load(false).await?;
        let snapshot = Snapshot {
            table: Arc::new(loaded.table),
            origin: loaded.origin,
            loaded_at: Utc::now(),
        };
        let table = Arc::clone(&snapshot.table);
        *guard = Some(snapshot);

        Ok(table)
    }

    /// Location for `phone`, or `Ok(None)` if no prefix matches.
    ///
    /// The error case only reports a failure to load the table.
    pub async fn find(&self, phone: &str) -> Result<Option<String>, SourceError> {
        let table = self.table().await?;
        Ok(resolver::find(table.as_ref(), phone).map(str::to_string))
    }

    /// Like [`find`](Self::find), with the normalized digits and matching prefix.
    pub async fn resolve(&self, phone: &str) -> Result<Option<Resolution>, SourceError> {
        let table = self.table().await?;
        let digits = resolver::normalize(phone);

        let resolution = resolver::find_match(table.as_ref(), phone).map(|m| Resolution {
            prefix: m.prefix,
            location: m.location.to_string(),
            digits,
        });
        Ok(resolution)
    }

    /// Status of the installed table, or `None` before the first load.
    pub async fn status(&self) -> Option<DirectoryStatus> {
        let guard = self.inner.read().await;
        guard.as_ref().map(|s| DirectoryStatus {
            prefixes: s.table.len(),
            origin: s.origin,
            loaded_at: s.loaded_at,
        })
    }

    /// Reload the table, bypassing the disk cache.
    ///
    /// On success, replaces the current table and returns its size. On
    /// failure, the existing table is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, SourceError> {
        let loaded = self.loader.load(true).await?;
        let count = loaded.table.len();
        let snapshot = Snapshot {
            table: Arc::new(loaded.table),
            origin: loaded.origin,
            loaded_at: Utc::now(),
        };

        let mut guard = self.inner.write().await;
        *guard = Some(snapshot);
        info!(prefixes = count, "refreshed prefix table");

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceCache, SourceCacheConfig, SourceClient, SourceClientConfig};
    use crate::test_support::serve_source;
    use axum::http::StatusCode;
    use std::path::Path;
    use tempfile::tempdir;

    const SAMPLE: &str = "1408|California\n14089|San Jose, CA\n1212|New York, NY\n";
    const UPDATED: &str = "1408|California\n14089|San Jose, CA\n1212|New York, NY\n1646|New York, NY\n";

    fn directory(dir: &Path, url: &str) -> GeoDirectory {
        let client =
            SourceClient::new(SourceClientConfig::new(url).with_timeout_secs(2)).unwrap();
        let cache = SourceCache::new(SourceCacheConfig::new(dir));
        GeoDirectory::new(TableLoader::new(client, cache))
    }

    fn offline_directory(dir: &Path) -> GeoDirectory {
        directory(dir, "http://127.0.0.1:9/1.txt")
    }

    #[tokio::test]
    async fn lazy_load_then_find() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1.txt"), SAMPLE).unwrap();
        let geo = offline_directory(dir.path());

        assert!(geo.status().await.is_none());

        assert_eq!(
            geo.find("+1 (408) 996-1010").await.unwrap().as_deref(),
            Some("San Jose, CA")
        );
        assert_eq!(geo.find("9999999999").await.unwrap(), None);
        assert_eq!(geo.find("abc").await.unwrap(), None);

        let status = geo.status().await.unwrap();
        assert_eq!(status.prefixes, 3);
        assert_eq!(status.origin, TableOrigin::RawCache);
    }

    #[tokio::test]
    async fn resolve_reports_digits_and_prefix() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1.txt"), SAMPLE).unwrap();
        let geo = offline_directory(dir.path());

        let r = geo.resolve("+1 408-555-0000").await.unwrap().unwrap();
        assert_eq!(r.digits, "14085550000");
        assert_eq!(r.prefix, "1408");
        assert_eq!(r.location, "California");

        assert!(geo.resolve("+44 20 7946 0000").await.unwrap().is_none());

        let r = geo.resolve("tél. +1 408 555 0000").await.unwrap().unwrap();
        assert_eq!(r.digits, "14085550000");
        assert_eq!(r.location, "California");
    }

    #[tokio::test]
    async fn load_failure_is_an_error_not_a_miss() {
        let dir = tempdir().unwrap();
        let geo = offline_directory(dir.path());

        let err = geo.find("14089961010").await.unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
        assert!(geo.status().await.is_none());
    }

    #[tokio::test]
    async fn concurrent_first_use_shares_one_table() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1.txt"), SAMPLE).unwrap();
        let geo = offline_directory(dir.path());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let geo = geo.clone();
                tokio::spawn(async move { geo.table().await.unwrap() })
            })
            .collect();

        let mut tables = Vec::new();
        for h in handles {
            tables.push(h.await.unwrap());
        }
        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
    }

    #[tokio::test]
    async fn refresh_replaces_table() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1.txt"), SAMPLE).unwrap();
        let url = serve_source(StatusCode::OK, UPDATED).await;
        let geo = directory(dir.path(), &url);

        assert_eq!(geo.find("16465550000").await.unwrap(), None);

        let count = geo.refresh().await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(
            geo.find("16465550000").await.unwrap().as_deref(),
            Some("New York, NY")
        );
        assert_eq!(geo.status().await.unwrap().origin, TableOrigin::Network);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_existing_table() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1.txt"), SAMPLE).unwrap();
        let url = serve_source(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let geo = directory(dir.path(), &url);

        geo.table().await.unwrap();
        let err = geo.refresh().await.unwrap_err();
        assert!(matches!(err, SourceError::Api { status: 500, .. }));

        assert_eq!(
            geo.find("14081234567").await.unwrap().as_deref(),
            Some("California")
        );
    }
}
