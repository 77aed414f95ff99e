//! In-memory trip catalog for testing without a database.

use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::TripRecord;
use crate::filter::Predicate;

use super::CatalogStore;
use super::error::CatalogError;
use super::seed::load_seed;

/// Catalog that holds trips in a vector and evaluates predicates directly.
///
/// Route matching folds ASCII case the same way SQLite's default `LIKE`
/// does, so both stores return the same rows for the same predicate.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    trips: Vec<TripRecord>,
}

impl MemoryCatalog {
    /// Create a catalog from trips, kept in the given order.
    pub fn new(trips: Vec<TripRecord>) -> Self {
        Self { trips }
    }

    /// Create a catalog from a JSON seed file.
    pub fn from_seed(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Ok(Self::new(load_seed(path)?))
    }

    /// All trips, in storage order.
    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the catalog holds no trips.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

impl CatalogStore for MemoryCatalog {
    fn query(&self, predicate: &Predicate) -> Result<Vec<TripRecord>, CatalogError> {
        Ok(self
            .trips
            .iter()
            .filter(|trip| predicate.matches(trip))
            .cloned()
            .collect())
    }

    fn route_names(&self) -> Result<Vec<String>, CatalogError> {
        let names: BTreeSet<&str> = self.trips.iter().map(|t| t.route_name.as_str()).collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }
}
