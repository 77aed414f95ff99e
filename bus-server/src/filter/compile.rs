//! Filter compilation and trip search.
//!
//! Turns a [`FilterRequest`] into a [`Predicate`] and runs it against a
//! catalog. Clauses are added in a fixed order (route, departure, class,
//! seats, arrival, price) so the same request always yields the same
//! predicate.

use crate::catalog::CatalogStore;
use crate::domain::TripRecord;

use super::config::FilterConfig;
use super::error::SearchError;
use super::predicate::{Clause, Predicate};
use super::request::FilterRequest;

/// Compile a request into a predicate.
///
/// The route clause is always present, even for blank origin or destination
/// (a blank substring matches every route). Each optional dimension adds at
/// most one clause, and only when it actually constrains something:
///
/// - a category list that expands to no labels adds nothing,
/// - a seat threshold of zero adds nothing,
/// - a price range equal to the configured slider range adds nothing.
pub fn compile(request: &FilterRequest, config: &FilterConfig) -> Predicate {
    let mut predicate = Predicate::new(Clause::RouteContains {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
    });

    if let Some(window) = request.departure {
        predicate.and(Clause::Departure(window.comparison(&config.windows)));
    }

    let labels = config
        .classes
        .expand(request.categories.iter().map(String::as_str));
    if !labels.is_empty() {
        predicate.and(Clause::ClassIn(labels));
    }

    if let Some(seats) = request.min_seats.filter(|&n| n > 0) {
        predicate.and(Clause::MinSeats(seats));
    }

    if let Some(window) = request.arrival {
        predicate.and(Clause::Arrival(window.comparison(&config.windows)));
    }

    if let Some(range) = request.price.filter(|r| *r != config.price_slider) {
        predicate.and(Clause::PriceBetween(range));
    }

    predicate
}

/// Trip search over a catalog.
///
/// Stateless: each call compiles a fresh predicate and issues one query.
pub struct TripFinder<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    config: &'a FilterConfig,
}

impl<'a, S: CatalogStore + ?Sized> TripFinder<'a, S> {
    /// Create a finder over the given store.
    pub fn new(store: &'a S, config: &'a FilterConfig) -> Self {
        Self { store, config }
    }

    /// Find trips matching the request, in storage order.
    ///
    /// No matches is `Ok` with an empty `Vec`.
    pub fn search(&self, request: &FilterRequest) -> Result<Vec<TripRecord>, SearchError> {
        let predicate = compile(request, self.config);
        tracing::debug!(
            clauses = predicate.len(),
            shape = %predicate.describe(),
            "compiled trip predicate"
        );

        let trips = self.store.query(&predicate)?;
        tracing::debug!(matches = trips.len(), "trip search finished");

        Ok(trips)
    }
}

/// Find trips between `origin` and `destination` matching `filters`.
///
/// `origin` and `destination` override whatever the request already holds.
pub fn search<S: CatalogStore + ?Sized>(
    store: &S,
    config: &FilterConfig,
    origin: &str,
    destination: &str,
    filters: FilterRequest,
) -> Result<Vec<TripRecord>, SearchError> {
    let request = FilterRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        ..filters
    };
    TripFinder::new(store, config).search(&request)
}
