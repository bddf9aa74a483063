//! Binary configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::source::{SourceCacheConfig, SourceClientConfig};

/// Error returned for an environment variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Everything the `geophone` binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where to download the source file from.
    pub source: SourceClientConfig,

    /// Disk cache location and TTL.
    pub cache: SourceCacheConfig,

    /// Whether loads write the cache back to disk.
    pub write_cache: bool,

    /// HTTP listen address.
    pub bind: SocketAddr,

    /// How often the server re-downloads the source.
    pub refresh_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceClientConfig::default(),
            cache: SourceCacheConfig::default(),
            write_cache: true,
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            refresh_interval: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    ///
    /// | Variable                  | Default                         |
    /// |---------------------------|---------------------------------|
    /// | `GEOPHONE_SOURCE_URL`     | libphonenumber `geocoding/en/1.txt` |
    /// | `GEOPHONE_CACHE_DIR`      | `cache`                         |
    /// | `GEOPHONE_CACHE_TTL_SECS` | `86400`                         |
    /// | `GEOPHONE_WRITE_CACHE`    | `true`                          |
    /// | `GEOPHONE_BIND`           | `127.0.0.1:3000`                |
    /// | `GEOPHONE_REFRESH_SECS`   | `86400`                         |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("GEOPHONE_SOURCE_URL") {
            config.source = SourceClientConfig::new(url);
        }

        if let Some(dir) = lookup("GEOPHONE_CACHE_DIR") {
            config.cache.dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup("GEOPHONE_CACHE_TTL_SECS") {
            let secs = parse_secs("GEOPHONE_CACHE_TTL_SECS", &value)?;
            config.cache = config.cache.with_ttl(Duration::from_secs(secs));
        }

        if let Some(value) = lookup("GEOPHONE_WRITE_CACHE") {
            config.write_cache = parse_bool("GEOPHONE_WRITE_CACHE", &value)?;
        }

        if let Some(value) = lookup("GEOPHONE_BIND") {
            config.bind = value.parse().map_err(|_| ConfigError {
                var: "GEOPHONE_BIND",
                value: value.clone(),
                reason: "expected host:port",
            })?;
        }

        if let Some(value) = lookup("GEOPHONE_REFRESH_SECS") {
            let secs = parse_secs("GEOPHONE_REFRESH_SECS", &value)?;
            if secs == 0 {
                return Err(ConfigError {
                    var: "GEOPHONE_REFRESH_SECS",
                    value,
                    reason: "must be greater than zero",
                });
            }
            config.refresh_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        var,
        value: value.to_string(),
        reason: "expected a whole number of seconds",
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            var,
            value: value.to_string(),
            reason: "expected true or false",
        }),
    }
}
