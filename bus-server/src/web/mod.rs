//! Web layer for the bus finder.
//!
//! Provides HTTP endpoints for trip search and stop name autocomplete.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
