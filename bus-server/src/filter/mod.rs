//! Trip filtering.
//!
//! This module turns a user's search (route plus optional time windows,
//! class categories, seat threshold and price range) into a single
//! parameterized predicate and runs it against the catalog.
//!
//! Caller-supplied values always travel as bound values inside the
//! predicate's clauses. The only query text that depends on the request is
//! the time-window comparison, which comes from the fixed window table.

mod classes;
mod compile;
mod config;
mod error;
mod predicate;
mod request;
mod window;


pub use classes::{ClassCategory, ClassTable};
pub use compile::{TripFinder, compile, search};
pub use config::{DEFAULT_MAX_PRICE, FilterConfig};
pub use error::{FilterError, SearchError};
pub use predicate::{BoundValue, Clause, Predicate};
pub use request::{FilterRequest, PriceRange};
pub use window::{TimeComparison, TimeWindow, WindowBounds};
