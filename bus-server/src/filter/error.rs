//! Filter and search error types.

use crate::catalog::CatalogError;

/// A filter field holds a value outside what it accepts.
///
/// These are raised before the catalog is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Time-window token outside the closed set
    #[error("invalid filter value: unknown time window {0:?}")]
    UnknownTimeWindow(String),

    /// Price range with lower bound above upper bound
    #[error("invalid filter value: price range lower bound {lower} exceeds upper bound {upper}")]
    InvertedPriceRange { lower: f64, upper: f64 },

    /// Price bound that is NaN, infinite or negative
    #[error("invalid filter value: price bound {0} is not a non-negative finite number")]
    InvalidPrice(f64),

    /// Filter configuration is inconsistent
    #[error("invalid filter configuration: {0}")]
    InvalidConfig(String),
}

/// Error from a trip search.
///
/// An empty result is not an error; it is an empty `Vec`.
///
/// [`TripFinder::search`](super::TripFinder::search) itself only returns
/// `DataAccess`: a [`FilterRequest`](super::FilterRequest) can't hold an
/// invalid window or price, because [`TimeWindow::parse`](super::TimeWindow::parse)
/// and [`PriceRange::new`](super::PriceRange::new) reject bad values when the
/// request is built. Callers that parse raw input and search in one step use
/// `?` on those constructors to get `InvalidFilter`.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request was rejected before querying
    #[error(transparent)]
    InvalidFilter(#[from] FilterError),

    /// The catalog could not answer the query
    #[error(transparent)]
    DataAccess(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FilterError::InvertedPriceRange {
            lower: 900.0,
            upper: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid filter value: price range lower bound 900 exceeds upper bound 100"
        );

        let err = FilterError::InvalidPrice(f64::NAN);
        assert_eq!(
            err.to_string(),
            "invalid filter value: price bound NaN is not a non-negative finite number"
        );

        let err = SearchError::from(FilterError::UnknownTimeWindow("noon".into()));
        assert_eq!(
            err.to_string(),
            "invalid filter value: unknown time window \"noon\""
        );

        let err = SearchError::from(CatalogError::Unavailable("connection closed".into()));
        assert_eq!(err.to_string(), "catalog unavailable: connection closed");
    }
}
