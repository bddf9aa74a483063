//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::DirectoryStatus;
use crate::source::TableOrigin;

/// Query string for `/lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    /// Phone number in any format
    pub phone: Option<String>,
}

/// Result of a lookup. `prefix` and `location` are null when nothing matched.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupResponse {
    /// The phone number as given
    pub phone: String,

    /// Digits left after normalization
    pub digits: String,

    /// Longest matching prefix
    pub prefix: Option<String>,

    /// Location for that prefix
    pub location: Option<String>,
}

/// Response for `/status`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// Whether a table has been loaded yet
    pub loaded: bool,

    /// Number of prefixes in the table
    pub prefixes: usize,

    /// Where the table came from: "table_cache", "raw_cache" or "network"
    pub origin: Option<String>,

    /// When the table was loaded
    pub loaded_at: Option<DateTime<Utc>>,
}

impl StatusResponse {
    pub fn from_status(status: Option<DirectoryStatus>) -> Self {
        match status {
            Some(s) => Self {
                loaded: true,
                prefixes: s.prefixes,
                origin: Some(origin_name(s.origin).to_string()),
                loaded_at: Some(s.loaded_at),
            },
            None => Self {
                loaded: false,
                prefixes: 0,
                origin: None,
                loaded_at: None,
            },
        }
    }
}

fn origin_name(origin: TableOrigin) -> &'static str {
    match origin {
        TableOrigin::TableCache => "table_cache",
        TableOrigin::RawCache => "raw_cache",
        TableOrigin::Network => "network",
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
