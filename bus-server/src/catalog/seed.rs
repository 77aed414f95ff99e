//! Seed data loading.
//!
//! Seed files are JSON arrays of trip records, used to bootstrap an empty
//! catalog and to drive the in-memory store.

use std::path::Path;

use crate::domain::TripRecord;

use super::error::CatalogError;

/// Load trips from a JSON seed file.
///
/// Route names are checked for the "origin to destination" shape; a record
/// that breaks it rejects the whole file.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Vec<TripRecord>, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| CatalogError::Seed {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;

    let trips = parse_seed(&json).map_err(|e| match e {
        CatalogError::Seed { message } => CatalogError::Seed {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })?;

    tracing::info!(path = %path.display(), trips = trips.len(), "loaded seed data");
    Ok(trips)
}

fn parse_seed(json: &str) -> Result<Vec<TripRecord>, CatalogError> {
    let trips: Vec<TripRecord> = serde_json::from_str(json).map_err(|e| CatalogError::Seed {
        message: format!("failed to parse: {e}"),
    })?;

    for (i, trip) in trips.iter().enumerate() {
        trip.route().map_err(|e| CatalogError::Seed {
            message: format!("record {i}: {e}"),
        })?;
    }

    Ok(trips)
}
