//! Shared fixtures for integration tests.

#![allow(dead_code)]

use bus_server::domain::{TimeOfDay, TripRecord};

pub fn trip(
    route: &str,
    bus_name: &str,
    bus_type: &str,
    departing: &str,
    reaching: &str,
    price: f64,
    seats: u32,
) -> TripRecord {
    TripRecord {
        route_name: route.to_string(),
        bus_name: bus_name.to_string(),
        bus_type: bus_type.to_string(),
        departing_time: TimeOfDay::parse(departing).unwrap(),
        duration: "06h 00m".to_string(),
        reaching_time: TimeOfDay::parse(reaching).unwrap(),
        star_rating: 4.0,
        price,
        seat_availability: seats,
    }
}

/// A small catalog with real class labels from the built-in table.
pub fn sample_trips() -> Vec<TripRecord> {
    vec![
        trip("Hyderabad to Vijayawada", "APSRTC Indra", "INDRA (A.C. Seater)", "05:15", "11:15", 650.0, 12),
        trip("Hyderabad to Vijayawada", "Orange Travels", "A/C Sleeper (2+1)", "22:30", "04:30", 1100.0, 2),
        trip("Hyderabad to Vijayawada", "Morning Star", "NON A/C Seater (2+2)", "07:00", "13:00", 380.0, 30),
        trip("Hyderabad to Vijayawada", "Kaveri", "NON A/C Sleeper (2+1)", "19:45", "01:45", 720.0, 0),
        trip("Vijayawada to Hyderabad", "APSRTC Garuda", "GARUDA PLUS (VOLVO / BENZ A.C Multi Axle)", "14:00", "20:00", 900.0, 18),
        trip("Hyderabad to Guntur", "SVR Travels", "Volvo Multi-Axle A/C Sleeper (2+1)", "23:00", "05:00", 1250.0, 6),
    ]
}

pub fn bus_names(trips: &[TripRecord]) -> Vec<&str> {
    trips.iter().map(|t| t.bus_name.as_str()).collect()
}
