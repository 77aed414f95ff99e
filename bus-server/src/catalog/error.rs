//! Catalog error types.

/// Errors that can occur when reading from (or seeding) the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// SQLite reported an error
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The store cannot serve queries right now
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be turned into a trip record
    #[error("malformed row in column {column}: {message}")]
    MalformedRow {
        column: &'static str,
        message: String,
    },

    /// Seed data could not be read or parsed
    #[error("seed data error: {message}")]
    Seed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::Unavailable("lock poisoned".into());
        assert_eq!(err.to_string(), "catalog unavailable: lock poisoned");

        let err = CatalogError::MalformedRow {
            column: "Departing_Time",
            message: "invalid time: hour must be 0-23".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed row in column Departing_Time: invalid time: hour must be 0-23"
        );

        let err = CatalogError::Seed {
            message: "expected array".into(),
        };
        assert_eq!(err.to_string(), "seed data error: expected array");

        let err = CatalogError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.to_string().starts_with("database error:"));
    }
}
