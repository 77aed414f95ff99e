//! Structured trip predicates.
//!
//! A [`Predicate`] is an ordered list of [`Clause`]s joined by AND. Each
//! clause carries the caller-supplied values it needs as data, never as query
//! text. Stores decide how to execute a predicate: the SQLite store renders
//! it to SQL with bound parameters, the in-memory store evaluates it directly
//! via [`Predicate::matches`].

use crate::domain::TripRecord;

use super::request::PriceRange;
use super::window::TimeComparison;

/// A value a store binds to a query placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

/// One AND-ed condition on a trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Route name contains both substrings.
    RouteContains { origin: String, destination: String },

    /// Departure time satisfies the comparison.
    Departure(TimeComparison),

    /// Class label is one of the listed labels. Never empty.
    ClassIn(Vec<String>),

    /// Available seats is at least the threshold. Never zero.
    MinSeats(u32),

    /// Arrival time satisfies the comparison.
    Arrival(TimeComparison),

    /// Price lies in the inclusive range.
    PriceBetween(PriceRange),
}

impl Clause {
    /// Short tag naming the clause kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Clause::RouteContains { .. } => "route",
            Clause::Departure(_) => "departure",
            Clause::ClassIn(_) => "class",
            Clause::MinSeats(_) => "seats",
            Clause::Arrival(_) => "arrival",
            Clause::PriceBetween(_) => "price",
        }
    }

    /// Values this clause binds, in placeholder order.
    ///
    /// Time comparisons bind nothing: their boundaries come from the fixed
    /// window table, not from the caller.
    pub fn bound_values(&self) -> Vec<BoundValue> {
        match self {
            Clause::RouteContains {
                origin,
                destination,
            } => vec![
                BoundValue::Text(origin.clone()),
                BoundValue::Text(destination.clone()),
            ],
            Clause::Departure(_) | Clause::Arrival(_) => Vec::new(),
            Clause::ClassIn(labels) => labels.iter().cloned().map(BoundValue::Text).collect(),
            Clause::MinSeats(n) => vec![BoundValue::Integer(i64::from(*n))],
            Clause::PriceBetween(range) => vec![
                BoundValue::Real(range.lower()),
                BoundValue::Real(range.upper()),
            ],
        }
    }

    /// Evaluate the clause against a record.
    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            Clause::RouteContains {
                origin,
                destination,
            } => {
                contains_ignore_ascii_case(&trip.route_name, origin)
                    && contains_ignore_ascii_case(&trip.route_name, destination)
            }
            Clause::Departure(cmp) => cmp.contains(trip.departing_time),
            Clause::ClassIn(labels) => labels.iter().any(|l| l == &trip.bus_type),
            Clause::MinSeats(n) => trip.seat_availability >= *n,
            Clause::Arrival(cmp) => cmp.contains(trip.reaching_time),
            Clause::PriceBetween(range) => range.contains(trip.price),
        }
    }
}

/// An AND of clauses, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Start a predicate with a single clause.
    pub fn new(first: Clause) -> Self {
        Self {
            clauses: vec![first],
        }
    }

    /// AND another clause onto the predicate.
    pub fn and(&mut self, clause: Clause) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    /// The clauses in order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the predicate has no clauses (matches everything).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// All bound values across clauses, in placeholder order.
    pub fn bound_values(&self) -> Vec<BoundValue> {
        self.clauses.iter().flat_map(Clause::bound_values).collect()
    }

    /// Whether every clause holds for the record.
    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.clauses.iter().all(|c| c.matches(trip))
    }

    /// Clause kinds joined with "+", e.g. "route+class+price".
    pub fn describe(&self) -> String {
        self.clauses
            .iter()
            .map(Clause::kind)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Substring test that folds ASCII case only, like SQLite's default `LIKE`.
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
