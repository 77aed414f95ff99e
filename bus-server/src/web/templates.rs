//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::TripRecord;
use crate::filter::{ClassCategory, TimeWindow};

/// Home page with search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub categories: Vec<ClassCategory>,
    pub windows: Vec<WindowOption>,
    pub price_min: String,
    pub price_max: String,
}

/// Trip results fragment.
#[derive(Template)]
#[template(path = "trip_results.html")]
pub struct TripResultsTemplate {
    pub origin: String,
    pub destination: String,
    pub trips: Vec<TripView>,
}

/// A time window choice in the search form.
#[derive(Debug, Clone)]
pub struct WindowOption {
    pub token: &'static str,
    pub label: &'static str,
}

impl WindowOption {
    /// Options for every window, in chronological order.
    pub fn all() -> Vec<Self> {
        TimeWindow::ALL
            .iter()
            .map(|w| WindowOption {
                token: w.token(),
                label: match w {
                    TimeWindow::Before06 => "Before 6 AM",
                    TimeWindow::From06To12 => "6 AM to 12 PM",
                    TimeWindow::From12To18 => "12 PM to 6 PM",
                    TimeWindow::After18 => "After 6 PM",
                },
            })
            .collect()
    }
}

/// Trip view model for templates.
#[derive(Debug, Clone)]
pub struct TripView {
    pub bus_name: String,
    pub bus_type: String,
    pub departing_time: String,
    pub duration: String,
    pub reaching_time: String,
    pub star_rating: String,
    pub price: String,
    pub seat_availability: u32,
}

impl TripView {
    /// Create from a catalog record.
    pub fn from_trip(trip: &TripRecord) -> Self {
        Self {
            bus_name: trip.bus_name.clone(),
            bus_type: trip.bus_type.clone(),
            departing_time: trip.departing_time.to_string(),
            duration: trip.duration.clone(),
            reaching_time: trip.reaching_time.to_string(),
            star_rating: format!("{:.1}", trip.star_rating),
            price: format!("{:.2}", trip.price),
            seat_availability: trip.seat_availability,
        }
    }

    /// Whether only a handful of seats remain.
    pub fn is_filling_up(&self) -> bool {
        self.seat_availability < 5
    }
}
