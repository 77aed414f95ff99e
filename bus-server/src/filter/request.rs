//! Search requests.

use serde::{Deserialize, Serialize};

use super::error::FilterError;
use super::window::TimeWindow;

/// An inclusive price range.
///
/// Both bounds are finite and non-negative, and `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceRange {
    lower: f64,
    upper: f64,
}

impl PriceRange {
    /// Create a validated price range.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::filter::PriceRange;
    ///
    /// let range = PriceRange::new(200.0, 800.0).unwrap();
    /// assert!(range.contains(800.0));
    /// assert!(PriceRange::new(800.0, 200.0).is_err());
    /// ```
    pub fn new(lower: f64, upper: f64) -> Result<Self, FilterError> {
        for bound in [lower, upper] {
            if !bound.is_finite() || bound < 0.0 {
                return Err(FilterError::InvalidPrice(bound));
            }
        }
        if lower > upper {
            return Err(FilterError::InvertedPriceRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound, inclusive.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound, inclusive.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Whether `price` lies within the range.
    pub fn contains(&self, price: f64) -> bool {
        self.lower <= price && price <= self.upper
    }
}

impl TryFrom<(f64, f64)> for PriceRange {
    type Error = FilterError;

    fn try_from((lower, upper): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lower, upper)
    }
}

impl From<PriceRange> for (f64, f64) {
    fn from(range: PriceRange) -> Self {
        (range.lower, range.upper)
    }
}

/// A single trip search.
///
/// Every optional field is independent: `None` (or an empty category list,
/// or a zero seat threshold) means "no constraint on this dimension".
///
/// # Examples
///
/// ```
/// use bus_server::filter::{FilterRequest, TimeWindow};
///
/// let request = FilterRequest::new("Hyderabad", "Vijayawada")
///     .with_departure(TimeWindow::After18)
///     .with_categories(["AC", "SLEEPER"])
///     .with_min_seats(2);
/// assert_eq!(request.categories.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// Substring the route name must contain for the origin.
    pub origin: String,

    /// Substring the route name must contain for the destination.
    pub destination: String,

    /// Departure time-of-day window.
    pub departure: Option<TimeWindow>,

    /// Arrival time-of-day window.
    pub arrival: Option<TimeWindow>,

    /// User-facing class categories, expanded before compilation.
    pub categories: Vec<String>,

    /// Minimum available seats. Zero disables the constraint.
    pub min_seats: Option<u32>,

    /// Inclusive price range.
    pub price: Option<PriceRange>,
}

impl FilterRequest {
    /// Create a request with only the route constraint.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Restrict departure to a window.
    pub fn with_departure(mut self, window: TimeWindow) -> Self {
        self.departure = Some(window);
        self
    }

    /// Restrict arrival to a window.
    pub fn with_arrival(mut self, window: TimeWindow) -> Self {
        self.arrival = Some(window);
        self
    }

    /// Restrict to the given class categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Require at least `seats` available seats.
    pub fn with_min_seats(mut self, seats: u32) -> Self {
        self.min_seats = Some(seats);
        self
    }

    /// Restrict to a price range.
    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }
}
