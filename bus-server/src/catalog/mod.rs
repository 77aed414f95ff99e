//! Trip catalog storage.
//!
//! The search path only ever reads from the catalog, through the narrow
//! [`CatalogStore`] trait. Two stores are provided: [`SqliteCatalog`] for
//! real data and [`MemoryCatalog`] for tests and demos.

mod error;
mod memory;
mod seed;
mod sqlite;

pub use error::CatalogError;
pub use memory::MemoryCatalog;
pub use seed::load_seed;
pub use sqlite::{SqliteCatalog, render_sql};

use crate::domain::TripRecord;
use crate::filter::Predicate;

/// Read access to the trip catalog.
///
/// This abstraction lets search run against SQLite in production and plain
/// vectors in tests. Implementations must allow concurrent readers.
pub trait CatalogStore: Send + Sync {
    /// Return every trip matching the predicate, in storage order.
    fn query(&self, predicate: &Predicate) -> Result<Vec<TripRecord>, CatalogError>;

    /// Return the distinct route names in the catalog.
    fn route_names(&self) -> Result<Vec<String>, CatalogError>;
}
