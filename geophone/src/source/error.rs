//! Source loading error types.

/// Errors that can occur while fetching, caching or loading the prefix data.
///
/// "No location for this number" is never one of these; it is `None` from a
/// lookup.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source server returned an error status
    #[error("source error {status}: {message}")]
    Api { status: u16, message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },

    /// Source text contained no usable records
    #[error("source data contains no prefix records")]
    EmptySource,
}
