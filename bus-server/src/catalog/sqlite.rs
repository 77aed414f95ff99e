//! SQLite-backed trip catalog.
//!
//! Trips live in a single `bus_routes` table. Predicates are rendered to SQL
//! here, at execution time: every caller-supplied value becomes a numbered
//! placeholder, and only the window comparisons are written inline.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::types::ToSqlOutput;
use rusqlite::{Connection, ToSql, params, params_from_iter};

use crate::domain::{TimeOfDay, TripRecord};
use crate::filter::{BoundValue, Clause, Predicate, TimeComparison};

use super::CatalogStore;
use super::error::CatalogError;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS bus_routes (
        Route_Name TEXT NOT NULL,
        Bus_Name TEXT NOT NULL,
        Bus_Type TEXT NOT NULL,
        Departing_Time TEXT NOT NULL,
        Duration TEXT NOT NULL,
        Reaching_Time TEXT NOT NULL,
        Star_Rating REAL NOT NULL,
        Price REAL NOT NULL,
        Seat_Availability INTEGER NOT NULL
    )
"#;

const SELECT_TRIPS: &str = "SELECT Route_Name, Bus_Name, Bus_Type, Departing_Time, Duration, \
     Reaching_Time, Star_Rating, Price, Seat_Availability FROM bus_routes";

/// Trip catalog stored in SQLite.
///
/// The connection sits behind a mutex, so concurrent searches are serialized
/// at the connection but never block on each other's predicate compilation.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteCatalog {
    /// Open a catalog database file, creating it if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "opened trip catalog");

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory catalog.
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            path: None,
        })
    }

    /// The database file, if this catalog is file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create the `bus_routes` table if it is missing.
    ///
    /// This is a bootstrap convenience for empty databases; it never alters
    /// an existing table.
    pub fn ensure_table(&self) -> Result<(), CatalogError> {
        self.with_connection(|conn| {
            conn.execute(CREATE_TABLE, [])?;
            Ok(())
        })
    }

    /// Insert trips in one transaction, returning how many were written.
    ///
    /// Times are written as zero-padded "HH:MM" so text comparison in SQL
    /// agrees with chronological order.
    pub fn insert_all(&self, trips: &[TripRecord]) -> Result<usize, CatalogError> {
        self.with_connection(|conn| {
            let tx = conn.unchecked_transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO bus_routes (Route_Name, Bus_Name, Bus_Type, Departing_Time, \
                     Duration, Reaching_Time, Star_Rating, Price, Seat_Availability) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )?;
                for trip in trips {
                    stmt.execute(params![
                        trip.route_name,
                        trip.bus_name,
                        trip.bus_type,
                        trip.departing_time.to_string(),
                        trip.duration,
                        trip.reaching_time.to_string(),
                        trip.star_rating,
                        trip.price,
                        trip.seat_availability,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(trips.len())
        })
    }

    /// Number of trips in the catalog.
    pub fn count(&self) -> Result<usize, CatalogError> {
        self.with_connection(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM bus_routes", [], |row| row.get(0))?;
            Ok(usize::try_from(n).unwrap_or(0))
        })
    }

    /// Execute a function with access to the database connection.
    fn with_connection<F, T>(&self, f: F) -> Result<T, CatalogError>
    where
        F: FnOnce(&Connection) -> Result<T, CatalogError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CatalogError::Unavailable(format!("connection lock poisoned: {e}")))?;
        f(&conn)
    }
}

impl CatalogStore for SqliteCatalog {
    fn query(&self, predicate: &Predicate) -> Result<Vec<TripRecord>, CatalogError> {
        let (sql, values) = render_sql(predicate);

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
                Ok(RawTrip {
                    route_name: row.get(0)?,
                    bus_name: row.get(1)?,
                    bus_type: row.get(2)?,
                    departing_time: row.get(3)?,
                    duration: row.get(4)?,
                    reaching_time: row.get(5)?,
                    star_rating: row.get(6)?,
                    price: row.get(7)?,
                    seat_availability: row.get(8)?,
                })
            })?;

            let mut trips = Vec::new();
            for row in rows {
                trips.push(row?.into_trip()?);
            }
            Ok(trips)
        })
    }

    fn route_names(&self) -> Result<Vec<String>, CatalogError> {
        self.with_connection(|conn| {
            let mut stmt =
                conn.prepare("SELECT DISTINCT Route_Name FROM bus_routes ORDER BY Route_Name")?;
            let names = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(names)
        })
    }
}

/// A row as read from SQLite, before validation.
struct RawTrip {
    route_name: String,
    bus_name: String,
    bus_type: String,
    departing_time: String,
    duration: String,
    reaching_time: String,
    star_rating: f64,
    price: f64,
    seat_availability: i64,
}

impl RawTrip {
    fn into_trip(self) -> Result<TripRecord, CatalogError> {
        let departing_time =
            TimeOfDay::parse(&self.departing_time).map_err(|e| CatalogError::MalformedRow {
                column: "Departing_Time",
                message: e.to_string(),
            })?;
        let reaching_time =
            TimeOfDay::parse(&self.reaching_time).map_err(|e| CatalogError::MalformedRow {
                column: "Reaching_Time",
                message: e.to_string(),
            })?;
        let seat_availability =
            u32::try_from(self.seat_availability).map_err(|_| CatalogError::MalformedRow {
                column: "Seat_Availability",
                message: format!("{} is not a valid seat count", self.seat_availability),
            })?;

        Ok(TripRecord {
            route_name: self.route_name,
            bus_name: self.bus_name,
            bus_type: self.bus_type,
            departing_time,
            duration: self.duration,
            reaching_time,
            star_rating: self.star_rating,
            price: self.price,
            seat_availability,
        })
    }
}

impl ToSql for BoundValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            BoundValue::Text(s) => ToSqlOutput::from(s.as_str()),
            BoundValue::Integer(n) => ToSqlOutput::from(*n),
            BoundValue::Real(x) => ToSqlOutput::from(*x),
        })
    }
}

/// Render a predicate to a SELECT statement and its placeholder values.
///
/// Placeholders are numbered `?1..?n` in the order of the returned values.
/// Rows come back in insertion order.
///
/// # Examples
///
/// ```
/// use bus_server::catalog::render_sql;
/// use bus_server::filter::{Clause, Predicate};
///
/// let mut predicate = Predicate::new(Clause::RouteContains {
///     origin: "Goa".into(),
///     destination: "Pune".into(),
/// });
/// predicate.and(Clause::MinSeats(2));
///
/// let (sql, values) = render_sql(&predicate);
/// assert!(sql.contains("Seat_Availability >= ?3"));
/// assert_eq!(values.len(), 3);
/// ```
pub fn render_sql(predicate: &Predicate) -> (String, Vec<BoundValue>) {
    let mut values = Vec::new();
    let conditions: Vec<String> = predicate
        .clauses()
        .iter()
        .map(|clause| format!("({})", render_clause(clause, &mut values)))
        .collect();

    let mut sql = String::from(SELECT_TRIPS);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY rowid");

    (sql, values)
}

fn render_clause(clause: &Clause, values: &mut Vec<BoundValue>) -> String {
    let first = values.len() + 1;

    match clause {
        Clause::RouteContains { .. } => {
            values.extend(clause.bound_values().into_iter().map(like_contains));
            format!(
                "Route_Name LIKE ?{} ESCAPE '\\' AND Route_Name LIKE ?{} ESCAPE '\\'",
                first,
                first + 1
            )
        }
        Clause::Departure(cmp) => render_time("Departing_Time", cmp),
        Clause::Arrival(cmp) => render_time("Reaching_Time", cmp),
        Clause::ClassIn(_) => {
            values.extend(clause.bound_values());
            let placeholders: Vec<String> =
                (first..=values.len()).map(|i| format!("?{i}")).collect();
            format!("Bus_Type IN ({})", placeholders.join(", "))
        }
        Clause::MinSeats(_) => {
            values.extend(clause.bound_values());
            format!("Seat_Availability >= ?{first}")
        }
        Clause::PriceBetween(_) => {
            values.extend(clause.bound_values());
            format!("Price BETWEEN ?{} AND ?{}", first, first + 1)
        }
    }
}

/// Inline a window comparison. Boundaries are validated `TimeOfDay`s whose
/// text form is always `HH:MM`, never caller text.
///
/// Only the `HH:MM` prefix of the column is compared: rows stored as
/// `HH:MM:SS` are read back at minute precision, so they must be filtered
/// at minute precision too.
fn render_time(column: &str, cmp: &TimeComparison) -> String {
    let column = format!("substr({column}, 1, 5)");
    match cmp {
        TimeComparison::Before(t) => format!("{column} < '{t}'"),
        TimeComparison::Between(lo, hi) => format!("{column} BETWEEN '{lo}' AND '{hi}'"),
        TimeComparison::After(t) => format!("{column} > '{t}'"),
    }
}

/// Wrap a text value as a `LIKE` pattern matching it anywhere, literally.
fn like_contains(value: BoundValue) -> BoundValue {
    match value {
        BoundValue::Text(s) => BoundValue::Text(format!("%{}%", escape_like(&s))),
        other => other,
    }
}

/// Escape `LIKE` metacharacters so they match themselves under `ESCAPE '\'`.
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PriceRange;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn trip(route: &str, bus_type: &str, dep: &str, price: f64, seats: u32) -> TripRecord {
        TripRecord {
            route_name: route.into(),
            bus_name: format!("{bus_type} bus"),
            bus_type: bus_type.into(),
            departing_time: t(dep),
            duration: "5h".into(),
            reaching_time: t("23:00"),
            star_rating: 3.5,
            price,
            seat_availability: seats,
        }
    }

    fn route(origin: &str, destination: &str) -> Predicate {
        Predicate::new(Clause::RouteContains {
            origin: origin.into(),
            destination: destination.into(),
        })
    }

    fn catalog(trips: &[TripRecord]) -> SqliteCatalog {
        let catalog = SqliteCatalog::open_in_memory().unwrap();
        catalog.ensure_table().unwrap();
        catalog.insert_all(trips).unwrap();
        catalog
    }

    #[test]
    fn escape_like_metacharacters() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn render_route_only() {
        let (sql, values) = render_sql(&route("Goa", "Pune"));
        assert!(sql.ends_with(
            "WHERE (Route_Name LIKE ?1 ESCAPE '\\' AND Route_Name LIKE ?2 ESCAPE '\\') ORDER BY rowid"
        ));
        assert_eq!(
            values,
            vec![
                BoundValue::Text("%Goa%".into()),
                BoundValue::Text("%Pune%".into())
            ]
        );
    }

    #[test]
    fn render_every_clause_in_order() {
        let mut predicate = route("A", "B");
        predicate
            .and(Clause::Departure(TimeComparison::Before(t("06:00"))))
            .and(Clause::ClassIn(vec!["X".into(), "Y".into()]))
            .and(Clause::MinSeats(4))
            .and(Clause::Arrival(TimeComparison::Between(t("06:00"), t("12:00"))))
            .and(Clause::PriceBetween(PriceRange::new(100.0, 900.0).unwrap()));

        let (sql, values) = render_sql(&predicate);
        let where_clause = sql.split(" WHERE ").nth(1).unwrap();
        assert_eq!(
            where_clause,
            "(Route_Name LIKE ?1 ESCAPE '\\' AND Route_Name LIKE ?2 ESCAPE '\\') \
             AND (substr(Departing_Time, 1, 5) < '06:00') \
             AND (Bus_Type IN (?3, ?4)) \
             AND (Seat_Availability >= ?5) \
             AND (substr(Reaching_Time, 1, 5) BETWEEN '06:00' AND '12:00') \
             AND (Price BETWEEN ?6 AND ?7) \
             ORDER BY rowid"
        );
        assert_eq!(values.len(), 7);
        assert_eq!(values[4], BoundValue::Integer(4));
        assert_eq!(values[6], BoundValue::Real(900.0));
    }

    #[test]
    fn render_never_inlines_caller_text() {
        let hostile = "x' OR '1'='1";
        let mut predicate = route(hostile, "; DROP TABLE bus_routes; --");
        predicate.and(Clause::ClassIn(vec![hostile.into()]));

        let (sql, _) = render_sql(&predicate);
        assert!(!sql.contains("OR '1'"));
        assert!(!sql.contains("DROP"));
    }

    #[test]
    fn empty_predicate_selects_all() {
        let (sql, values) = render_sql(&Predicate::default());
        assert_eq!(sql, format!("{SELECT_TRIPS} ORDER BY rowid"));
        assert!(values.is_empty());
    }

    #[test]
    fn query_returns_matches_in_storage_order() {
        let trips = vec![
            trip("Goa to Pune", "AC Seater", "21:00", 900.0, 5),
            trip("Delhi to Agra", "AC Seater", "08:00", 400.0, 5),
            trip("Goa to Pune", "Sleeper", "05:00", 700.0, 0),
        ];
        let catalog = catalog(&trips);

        let found = catalog.query(&route("Goa", "Pune")).unwrap();
        assert_eq!(found, vec![trips[0].clone(), trips[2].clone()]);
    }

    #[test]
    fn query_with_no_matches_is_empty() {
        let catalog = catalog(&[trip("Goa to Pune", "AC Seater", "21:00", 900.0, 5)]);
        let found = catalog.query(&route("Chennai", "Madurai")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn like_wildcards_match_literally() {
        let trips = vec![
            trip("Goa to Pune", "AC Seater", "21:00", 900.0, 5),
            trip("100% Town to Pune", "AC Seater", "21:00", 900.0, 5),
        ];
        let catalog = catalog(&trips);

        let found = catalog.query(&route("%", "Pune")).unwrap();
        assert_eq!(found, vec![trips[1].clone()]);

        let found = catalog.query(&route("G_a", "Pune")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn quotes_in_values_do_not_break_the_query() {
        let trips = vec![trip("O'Valley to Pune", "AC Seater", "21:00", 900.0, 5)];
        let catalog = catalog(&trips);

        let found = catalog.query(&route("O'Valley", "Pune")).unwrap();
        assert_eq!(found.len(), 1);

        let found = catalog.query(&route("' OR '1'='1", "")).unwrap();
        assert!(found.is_empty());
        assert_eq!(catalog.count().unwrap(), 1);
    }

    #[test]
    fn class_and_seat_clauses() {
        let trips = vec![
            trip("A to B", "AC Seater", "10:00", 500.0, 10),
            trip("A to B", "Sleeper", "10:00", 500.0, 10),
            trip("A to B", "AC Seater", "10:00", 500.0, 1),
        ];
        let catalog = catalog(&trips);

        let mut predicate = route("A", "B");
        predicate
            .and(Clause::ClassIn(vec!["AC Seater".into()]))
            .and(Clause::MinSeats(2));

        assert_eq!(catalog.query(&predicate).unwrap(), vec![trips[0].clone()]);
    }

    #[test]
    fn window_comparison_on_stored_text() {
        let trips = vec![
            trip("A to B", "X", "05:59", 1.0, 1),
            trip("A to B", "X", "06:00", 1.0, 1),
            trip("A to B", "X", "18:00", 1.0, 1),
            trip("A to B", "X", "18:01", 1.0, 1),
        ];
        let catalog = catalog(&trips);

        let mut before = route("A", "B");
        before.and(Clause::Departure(TimeComparison::Before(t("06:00"))));
        assert_eq!(catalog.query(&before).unwrap(), vec![trips[0].clone()]);

        let mut after = route("A", "B");
        after.and(Clause::Departure(TimeComparison::After(t("18:00"))));
        assert_eq!(catalog.query(&after).unwrap(), vec![trips[3].clone()]);
    }

    #[test]
    fn windows_ignore_stored_seconds() {
        let catalog = SqliteCatalog::open_in_memory().unwrap();
        catalog.ensure_table().unwrap();
        catalog
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO bus_routes VALUES \
                     ('A to B', 'Noon Express', 'X', '12:00:00', '6h', '18:00:00', 4.0, 500.0, 3)",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let stored = catalog.query(&route("A", "B")).unwrap();
        assert_eq!(stored[0].departing_time, t("12:00"));
        let memory = crate::catalog::MemoryCatalog::new(stored);

        let cases = [
            Clause::Departure(TimeComparison::Between(t("06:00"), t("12:00"))),
            Clause::Departure(TimeComparison::After(t("12:00"))),
            Clause::Arrival(TimeComparison::Between(t("12:00"), t("18:00"))),
            Clause::Arrival(TimeComparison::After(t("18:00"))),
        ];
        let expected = [1, 0, 1, 0];

        for (clause, expected) in cases.into_iter().zip(expected) {
            let mut predicate = route("A", "B");
            predicate.and(clause.clone());
            let from_sqlite = catalog.query(&predicate).unwrap();
            let from_memory = memory.query(&predicate).unwrap();
            assert_eq!(from_sqlite.len(), expected, "{clause:?}");
            assert_eq!(from_sqlite, from_memory, "{clause:?}");
        }
    }

    #[test]
    fn route_names_are_distinct() {
        let catalog = catalog(&[
            trip("Goa to Pune", "X", "10:00", 1.0, 1),
            trip("Goa to Pune", "Y", "11:00", 1.0, 1),
            trip("Delhi to Agra", "X", "10:00", 1.0, 1),
        ]);
        assert_eq!(
            catalog.route_names().unwrap(),
            vec!["Delhi to Agra".to_string(), "Goa to Pune".to_string()]
        );
    }

    #[test]
    fn malformed_time_is_reported() {
        let catalog = catalog(&[]);
        catalog
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO bus_routes VALUES ('A to B', 'X', 'Y', '25:00', '1h', '10:00', 3.0, 10.0, 1)",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let err = catalog.query(&route("A", "B")).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MalformedRow {
                column: "Departing_Time",
                ..
            }
        ));
    }

    #[test]
    fn missing_table_is_data_access_error() {
        let catalog = SqliteCatalog::open_in_memory().unwrap();
        assert!(matches!(
            catalog.query(&route("A", "B")),
            Err(CatalogError::Sqlite(_))
        ));
    }
}
