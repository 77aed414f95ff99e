//! Domain types for the bus trip finder.
//!
//! This module contains the value types that represent validated catalog
//! data. Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod route;
mod time;
mod trip;

pub use route::{InvalidRouteName, ROUTE_SEPARATOR, RouteName};
pub use time::{TimeError, TimeOfDay};
pub use trip::TripRecord;
