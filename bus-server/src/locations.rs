//! Stop names derived from the catalog's route names.
//!
//! Every stored route name encodes "origin to destination"; splitting all of
//! them and flattening the endpoints gives the set of stops a user can pick
//! from. [`LocationIndex`] keeps a snapshot of that set for autocomplete and
//! refreshes it in the background.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::{CatalogError, CatalogStore};
use crate::domain::{ROUTE_SEPARATOR, RouteName};

/// Extract the distinct stop names from a set of route names.
///
/// Well-formed routes contribute both endpoints. A name without exactly one
/// separator contributes each non-blank piece it splits into, so a stray
/// record never hides its stops. The result is sorted.
///
/// # Examples
///
/// ```
/// use bus_server::locations::extract_locations;
///
/// let stops = extract_locations(["Goa to Pune", "Pune to Mumbai", "Goa to Pune"]);
/// let stops: Vec<_> = stops.into_iter().collect();
/// assert_eq!(stops, ["Goa", "Mumbai", "Pune"]);
/// ```
pub fn extract_locations<I, S>(route_names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stops = BTreeSet::new();

    for name in route_names {
        let name = name.as_ref();
        match RouteName::parse(name) {
            Ok(route) => {
                stops.insert(route.origin().to_string());
                stops.insert(route.destination().to_string());
            }
            Err(e) => {
                tracing::debug!(route = name, error = %e, "splitting irregular route name");
                stops.extend(
                    name.split(ROUTE_SEPARATOR)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
        }
    }

    stops
}

/// Read the catalog's route names and extract their stops.
pub fn fetch_locations<S: CatalogStore + ?Sized>(
    store: &S,
) -> Result<BTreeSet<String>, CatalogError> {
    Ok(extract_locations(store.route_names()?))
}

/// Thread-safe stop name lookup.
///
/// Holds a snapshot of the catalog's stops with support for background
/// refresh. A failed refresh keeps the previous snapshot.
#[derive(Clone, Default)]
pub struct LocationIndex {
    inner: Arc<RwLock<Vec<String>>>,
}

impl LocationIndex {
    /// Create an index from a known set of stops.
    pub fn new(stops: BTreeSet<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(stops.into_iter().collect())),
        }
    }

    /// Build an index by reading the catalog.
    pub fn fetch<S: CatalogStore + ?Sized>(store: &S) -> Result<Self, CatalogError> {
        Ok(Self::new(fetch_locations(store)?))
    }

    /// Replace the snapshot with the catalog's current stops.
    ///
    /// The catalog read runs on the blocking pool; the write lock is only
    /// taken once it has finished. Returns the new stop count. On failure the
    /// existing snapshot is kept.
    pub async fn refresh<S>(&self, store: Arc<S>) -> Result<usize, CatalogError>
    where
        S: CatalogStore + ?Sized + 'static,
    {
        let stops = tokio::task::spawn_blocking(move || fetch_locations(store.as_ref()))
            .await
            .map_err(|e| CatalogError::Unavailable(format!("location refresh task failed: {e}")))??;
        let stops: Vec<String> = stops.into_iter().collect();
        let count = stops.len();

        let mut guard = self.inner.write().await;
        *guard = stops;

        Ok(count)
    }

    /// Number of stops in the snapshot.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the snapshot is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// All stops, sorted.
    pub async fn all(&self) -> Vec<String> {
        self.inner.read().await.clone()
    }

    /// Search stops by name, for autocomplete.
    ///
    /// Matching ignores case. Stops starting with the query come first, then
    /// stops containing it elsewhere; each group stays alphabetical. An empty
    /// query lists the first `limit` stops.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let guard = self.inner.read().await;
        rank_matches(&guard, query, limit)
    }
}

fn rank_matches(stops: &[String], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();

    let mut prefix = Vec::new();
    let mut infix = Vec::new();
    for stop in stops {
        let lower = stop.to_lowercase();
        if lower.starts_with(&needle) {
            prefix.push(stop);
        } else if lower.contains(&needle) {
            infix.push(stop);
        }
    }

    prefix
        .into_iter()
        .chain(infix)
        .take(limit)
        .cloned()
        .collect()
}
