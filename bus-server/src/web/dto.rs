//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::TripRecord;
use crate::filter::ClassCategory;

/// Query string of a trip search.
///
/// Every field is taken as raw text so that malformed values produce the
/// same JSON error body as any other rejected filter.
#[derive(Debug, Default)]
pub struct SearchQuery {
    /// Substring of the departure stop
    pub origin: Option<String>,

    /// Substring of the arrival stop
    pub destination: Option<String>,

    /// Departure window token, `any` or empty for none
    pub departure: Option<String>,

    /// Arrival window token, `any` or empty for none
    pub arrival: Option<String>,

    /// Comma-separated class categories, e.g. "AC,SLEEPER". Repeated
    /// `class` keys are joined.
    pub class: Option<String>,

    /// Minimum available seats
    pub min_seats: Option<String>,

    /// Lower price bound
    pub price_min: Option<String>,

    /// Upper price bound
    pub price_max: Option<String>,
}

impl SearchQuery {
    /// Collect a query from decoded key/value pairs.
    ///
    /// A plain form posts one `class` key per ticked checkbox; those are
    /// joined with commas. For every other key the last value wins, and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = SearchQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "origin" => query.origin = Some(value),
                "destination" => query.destination = Some(value),
                "departure" => query.departure = Some(value),
                "arrival" => query.arrival = Some(value),
                "class" => {
                    query.class = Some(match query.class.take() {
                        Some(existing) => format!("{existing},{value}"),
                        None => value,
                    })
                }
                "min_seats" => query.min_seats = Some(value),
                "price_min" => query.price_min = Some(value),
                "price_max" => query.price_max = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// A trip in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResult {
    pub route_name: String,
    pub bus_name: String,
    pub bus_type: String,

    /// Departure time (HH:MM)
    pub departing_time: String,
    pub duration: String,

    /// Arrival time (HH:MM)
    pub reaching_time: String,
    pub star_rating: f64,
    pub price: f64,
    pub seat_availability: u32,
}

impl TripResult {
    /// Create from a catalog record.
    pub fn from_trip(trip: &TripRecord) -> Self {
        Self {
            route_name: trip.route_name.clone(),
            bus_name: trip.bus_name.clone(),
            bus_type: trip.bus_type.clone(),
            departing_time: trip.departing_time.to_string(),
            duration: trip.duration.clone(),
            reaching_time: trip.reaching_time.to_string(),
            star_rating: trip.star_rating,
            price: trip.price,
            seat_availability: trip.seat_availability,
        }
    }
}

/// Response to a trip search.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Number of trips found
    pub count: usize,

    /// Matching trips in catalog order
    pub trips: Vec<TripResult>,
}

impl SearchResponse {
    pub fn from_trips(trips: &[TripRecord]) -> Self {
        Self {
            count: trips.len(),
            trips: trips.iter().map(TripResult::from_trip).collect(),
        }
    }
}

/// Request to search stop names.
#[derive(Debug, Deserialize)]
pub struct LocationSearchRequest {
    /// Search text; empty lists the first stops alphabetically
    #[serde(default)]
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Response to a stop name search.
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationSearchResponse {
    pub locations: Vec<String>,
}

/// Response listing the class categories users can filter by.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassesResponse {
    pub categories: Vec<ClassCategory>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeOfDay;

    #[test]
    fn trip_result_formats_times() {
        let trip = TripRecord {
            route_name: "Chennai to Madurai".into(),
            bus_name: "SETC".into(),
            bus_type: "Non AC Seater (2+3)".into(),
            departing_time: TimeOfDay::from_hm(5, 5).unwrap(),
            duration: "08h 10m".into(),
            reaching_time: TimeOfDay::from_hm(13, 15).unwrap(),
            star_rating: 3.2,
            price: 420.0,
            seat_availability: 31,
        };

        let result = TripResult::from_trip(&trip);
        assert_eq!(result.departing_time, "05:05");
        assert_eq!(result.reaching_time, "13:15");

        let response = SearchResponse::from_trips(&[trip]);
        assert_eq!(response.count, 1);
        assert_eq!(response.trips[0], result);
    }

    #[test]
    fn search_query_from_pairs() {
        let pairs = [
            ("origin", "Chennai"),
            ("class", "AC"),
            ("destination", "Madurai"),
            ("class", "SLEEPER"),
            ("utm_source", "mail"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let query = SearchQuery::from_pairs(pairs);
        assert_eq!(query.origin.as_deref(), Some("Chennai"));
        assert_eq!(query.destination.as_deref(), Some("Madurai"));
        assert_eq!(query.class.as_deref(), Some("AC,SLEEPER"));
        assert!(query.price_min.is_none());
    }
}
