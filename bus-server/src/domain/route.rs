//! Route name types.

use std::fmt;

/// Token separating origin from destination in a stored route name.
pub const ROUTE_SEPARATOR: &str = " to ";

/// Error returned when parsing an invalid route name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route name: {reason}")]
pub struct InvalidRouteName {
    reason: &'static str,
}

/// A denormalized "origin to destination" route name.
///
/// The catalog encodes each route as a single string with exactly one
/// occurrence of [`ROUTE_SEPARATOR`]. This type guarantees that any
/// `RouteName` value splits cleanly into two non-blank endpoints.
///
/// # Examples
///
/// ```
/// use bus_server::domain::RouteName;
///
/// let route = RouteName::parse("Hyderabad to Vijayawada").unwrap();
/// assert_eq!(route.origin(), "Hyderabad");
/// assert_eq!(route.destination(), "Vijayawada");
///
/// // Missing separator
/// assert!(RouteName::parse("Hyderabad").is_err());
///
/// // Ambiguous: two separators
/// assert!(RouteName::parse("A to B to C").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteName {
    raw: String,
    split_at: usize,
}

impl RouteName {
    /// Parse a route name.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteName> {
        let mut matches = s.match_indices(ROUTE_SEPARATOR);

        let Some((split_at, _)) = matches.next() else {
            return Err(InvalidRouteName {
                reason: "missing \" to \" separator",
            });
        };

        if matches.next().is_some() {
            return Err(InvalidRouteName {
                reason: "more than one \" to \" separator",
            });
        }

        let route = Self {
            raw: s.to_string(),
            split_at,
        };

        if route.origin().is_empty() || route.destination().is_empty() {
            return Err(InvalidRouteName {
                reason: "origin and destination must be non-blank",
            });
        }

        Ok(route)
    }

    /// The origin stop, trimmed.
    pub fn origin(&self) -> &str {
        self.raw[..self.split_at].trim()
    }

    /// The destination stop, trimmed.
    pub fn destination(&self) -> &str {
        self.raw[self.split_at + ROUTE_SEPARATOR.len()..].trim()
    }

    /// Returns the route name exactly as stored.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteName({})", self.raw)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
