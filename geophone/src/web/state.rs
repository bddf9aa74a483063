//! Application state for the web layer.

use crate::directory::GeoDirectory;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Phone location directory
    pub directory: GeoDirectory,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: GeoDirectory) -> Self {
        Self { directory }
    }
}
