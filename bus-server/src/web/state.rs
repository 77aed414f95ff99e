//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::filter::FilterConfig;
use crate::locations::LocationIndex;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Trip catalog
    pub catalog: Arc<dyn CatalogStore>,

    /// Class table, window bounds and price slider
    pub filters: Arc<FilterConfig>,

    /// Stop names for autocomplete
    pub locations: LocationIndex,
}

impl AppState {
    /// Create a new app state.
    ///
    /// The catalog is shared so the binary can keep a handle for refreshing
    /// `locations`.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        filters: FilterConfig,
        locations: LocationIndex,
    ) -> Self {
        Self {
            catalog,
            filters: Arc::new(filters),
            locations,
        }
    }
}
