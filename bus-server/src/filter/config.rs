//! Filter configuration.
//!
//! The class table, the window boundaries and the price slider range are
//! read-only data built once at startup and shared by every search.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classes::ClassTable;
use super::error::FilterError;
use super::request::PriceRange;
use super::window::WindowBounds;

/// Default upper bound of the price slider.
pub const DEFAULT_MAX_PRICE: f64 = 5000.0;

/// Static data the filter compiler consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Category → concrete class label table.
    pub classes: ClassTable,

    /// Time-of-day window boundaries.
    pub windows: WindowBounds,

    /// Full range of the price control. A requested range equal to this is
    /// treated as no price constraint.
    pub price_slider: PriceRange,
}

impl FilterConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::filter::FilterConfig;
    ///
    /// let config = FilterConfig::from_json_str(r#"{"price_slider": [0, 8000]}"#).unwrap();
    /// assert_eq!(config.price_slider.upper(), 8000.0);
    /// assert!(config.classes.labels("AC").is_some());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, FilterError> {
        let config: FilterConfig = serde_json::from_str(json)
            .map_err(|e| FilterError::InvalidConfig(format!("failed to parse JSON: {e}")))?;
        config.validated()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            FilterError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    fn validated(self) -> Result<Self, FilterError> {
        self.windows.validate()?;
        Ok(self)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            classes: ClassTable::default(),
            windows: WindowBounds::default(),
            price_slider: PriceRange::new(0.0, DEFAULT_MAX_PRICE)
                .expect("constant price range is valid"),
        }
    }
}
