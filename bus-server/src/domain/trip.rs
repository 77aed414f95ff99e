//! Scheduled trip records.

use serde::{Deserialize, Serialize};

use super::route::{InvalidRouteName, RouteName};
use super::time::TimeOfDay;

/// A single scheduled bus trip as held by the catalog.
///
/// Records are read-only from the search path's point of view: the catalog
/// hands them out, and callers only render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Denormalized "origin to destination" route name.
    pub route_name: String,

    /// Operator or vehicle name.
    pub bus_name: String,

    /// Concrete vehicle class label, e.g. "Volvo Multi-Axle A/C Sleeper (2+1)".
    pub bus_type: String,

    /// Departure time of day.
    pub departing_time: TimeOfDay,

    /// Human-readable trip duration, e.g. "06h 30m".
    pub duration: String,

    /// Arrival time of day.
    pub reaching_time: TimeOfDay,

    /// Passenger star rating.
    pub star_rating: f64,

    /// Ticket price.
    pub price: f64,

    /// Seats currently available.
    pub seat_availability: u32,
}

impl TripRecord {
    /// Parse the stored route name into its endpoints.
    pub fn route(&self) -> Result<RouteName, InvalidRouteName> {
        RouteName::parse(&self.route_name)
    }
}
