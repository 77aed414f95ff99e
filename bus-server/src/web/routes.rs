//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::filter::{
    FilterConfig, FilterError, FilterRequest, PriceRange, SearchError, TimeWindow, TripFinder,
};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Default number of stop names returned by autocomplete.
const DEFAULT_LOCATION_LIMIT: usize = 10;

/// Upper bound on stop names returned by autocomplete.
const MAX_LOCATION_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/locations", get(search_locations))
        .route("/api/classes", get(list_classes))
        .route("/search", get(search_trips))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        categories: state.filters.classes.categories().to_vec(),
        windows: WindowOption::all(),
        price_min: format!("{}", state.filters.price_slider.lower()),
        price_max: format!("{}", state.filters.price_slider.upper()),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html))
}

/// Search stop names for autocomplete.
async fn search_locations(
    State(state): State<AppState>,
    Query(req): Query<LocationSearchRequest>,
) -> Json<LocationSearchResponse> {
    let limit = req
        .limit
        .unwrap_or(DEFAULT_LOCATION_LIMIT)
        .min(MAX_LOCATION_LIMIT);
    let locations = state.locations.search(&req.q, limit).await;

    Json(LocationSearchResponse { locations })
}

/// List the class categories and the labels each covers.
async fn list_classes(State(state): State<AppState>) -> Json<ClassesResponse> {
    Json(ClassesResponse {
        categories: state.filters.classes.categories().to_vec(),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Search for trips on a route.
async fn search_trips(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = SearchQuery::from_pairs(pairs);
    let request = parse_search_query(&query, &state.filters)?;

    // The catalog is synchronous; keep it off the async workers
    let catalog = state.catalog.clone();
    let filters = state.filters.clone();
    let search_request = request.clone();
    let trips = tokio::task::spawn_blocking(move || {
        TripFinder::new(catalog.as_ref(), &filters).search(&search_request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {}", e),
    })??;

    if accepts_html(&headers) {
        let template = TripResultsTemplate {
            origin: request.origin,
            destination: request.destination,
            trips: trips.iter().map(TripView::from_trip).collect(),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(SearchResponse::from_trips(&trips)).into_response())
    }
}

/// Turn raw query parameters into a filter request.
///
/// Origin and destination are required. Window tokens `any` and empty mean
/// no window. When only one price bound is given the other comes from the
/// configured slider range.
fn parse_search_query(query: &SearchQuery, config: &FilterConfig) -> Result<FilterRequest, AppError> {
    let origin = required_text(query.origin.as_deref(), "origin")?;
    let destination = required_text(query.destination.as_deref(), "destination")?;

    let mut request = FilterRequest::new(origin, destination);

    if let Some(window) = parse_window(query.departure.as_deref())? {
        request = request.with_departure(window);
    }
    if let Some(window) = parse_window(query.arrival.as_deref())? {
        request = request.with_arrival(window);
    }

    if let Some(classes) = query.class.as_deref() {
        request = request.with_categories(
            classes
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty()),
        );
    }

    if let Some(seats) = non_blank(query.min_seats.as_deref()) {
        let seats = seats.parse::<u32>().map_err(|_| AppError::BadRequest {
            message: format!("Invalid min_seats: {}", seats),
        })?;
        request = request.with_min_seats(seats);
    }

    let price_min = parse_price(query.price_min.as_deref(), "price_min")?;
    let price_max = parse_price(query.price_max.as_deref(), "price_max")?;
    if price_min.is_some() || price_max.is_some() {
        let range = PriceRange::new(
            price_min.unwrap_or(config.price_slider.lower()),
            price_max.unwrap_or(config.price_slider.upper()),
        )?;
        request = request.with_price(range);
    }

    Ok(request)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required_text<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    non_blank(value).ok_or_else(|| AppError::BadRequest {
        message: format!("Missing {}", field),
    })
}

fn parse_window(value: Option<&str>) -> Result<Option<TimeWindow>, FilterError> {
    match non_blank(value) {
        None => Ok(None),
        Some(token) if token.eq_ignore_ascii_case("any") => Ok(None),
        Some(token) => TimeWindow::parse(token).map(Some),
    }
}

fn parse_price(value: Option<&str>, field: &str) -> Result<Option<f64>, AppError> {
    non_blank(value)
        .map(|v| {
            v.parse::<f64>().map_err(|_| AppError::BadRequest {
                message: format!("Invalid {}: {}", field, v),
            })
        })
        .transpose()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<FilterError> for AppError {
    fn from(e: FilterError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidFilter(e) => e.into(),
            SearchError::DataAccess(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> SearchQuery {
        let mut q = SearchQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "origin" => q.origin = value,
                "destination" => q.destination = value,
                "departure" => q.departure = value,
                "arrival" => q.arrival = value,
                "class" => q.class = value,
                "min_seats" => q.min_seats = value,
                "price_min" => q.price_min = value,
                "price_max" => q.price_max = value,
                other => panic!("unknown key {other}"),
            }
        }
        q
    }

    fn parse(pairs: &[(&str, &str)]) -> Result<FilterRequest, AppError> {
        parse_search_query(&query(pairs), &FilterConfig::default())
    }

    #[test]
    fn route_only() {
        let request = parse(&[("origin", " Pune "), ("destination", "Goa")]).unwrap();
        assert_eq!(request, FilterRequest::new("Pune", "Goa"));
    }

    #[test]
    fn route_is_required() {
        assert!(matches!(
            parse(&[("origin", "Pune")]),
            Err(AppError::BadRequest { .. })
        ));
        assert!(matches!(
            parse(&[("origin", "  "), ("destination", "Goa")]),
            Err(AppError::BadRequest { .. })
        ));
    }

    #[test]
    fn windows() {
        let request = parse(&[
            ("origin", "Pune"),
            ("destination", "Goa"),
            ("departure", "after_18"),
            ("arrival", "any"),
        ])
        .unwrap();
        assert_eq!(request.departure, Some(TimeWindow::After18));
        assert_eq!(request.arrival, None);

        let err = parse(&[
            ("origin", "Pune"),
            ("destination", "Goa"),
            ("departure", "LATE"),
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[test]
    fn classes_are_split() {
        let request = parse(&[
            ("origin", "Pune"),
            ("destination", "Goa"),
            ("class", "AC, SLEEPER,,"),
        ])
        .unwrap();
        assert_eq!(request.categories, ["AC", "SLEEPER"]);
    }

    #[test]
    fn seats() {
        let request = parse(&[
            ("origin", "Pune"),
            ("destination", "Goa"),
            ("min_seats", "4"),
        ])
        .unwrap();
        assert_eq!(request.min_seats, Some(4));

        assert!(
            parse(&[
                ("origin", "Pune"),
                ("destination", "Goa"),
                ("min_seats", "-1"),
            ])
            .is_err()
        );
    }

    #[test]
    fn single_price_bound_uses_slider() {
        let request = parse(&[
            ("origin", "Pune"),
            ("destination", "Goa"),
            ("price_min", "800"),
        ])
        .unwrap();
        assert_eq!(request.price, Some(PriceRange::new(800.0, 5000.0).unwrap()));

        let request = parse(&[
            ("origin", "Pune"),
            ("destination", "Goa"),
            ("price_max", "800"),
        ])
        .unwrap();
        assert_eq!(request.price, Some(PriceRange::new(0.0, 800.0).unwrap()));
    }

    #[test]
    fn inverted_price_is_rejected() {
        let err = parse(&[
            ("origin", "Pune"),
            ("destination", "Goa"),
            ("price_min", "900"),
            ("price_max", "100"),
        ])
        .unwrap_err();

        match err {
            AppError::BadRequest { message } => {
                assert!(message.starts_with("invalid filter value"))
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn accepts_html_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
        assert!(accepts_html(&headers));
    }
}
