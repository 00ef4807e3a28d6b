//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDate};

use crate::domain::{CategoryFilter, RouteStationInfo, format_tickets};
use crate::rail::{DecodeError, RailError, convert_route_stations, convert_tickets};
use crate::stations::StationSummary;

use super::dto::{CityQuery, RouteQuery, StationNameQuery, TicketQuery};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/in-city", get(stations_in_city))
        .route("/api/stations/city-code", get(city_station))
        .route("/api/stations/by-name", get(station_by_name))
        .route("/api/tickets", get(query_tickets))
        .route("/api/route", get(query_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations located in a city.
async fn stations_in_city(
    State(state): State<AppState>,
    Query(req): Query<CityQuery>,
) -> Result<Json<Vec<StationSummary>>, AppError> {
    let stations = state
        .index
        .stations_in_city(&req.city)
        .ok_or_else(|| AppError::NotFound {
            message: format!("city not found: {}", req.city),
        })?;
    Ok(Json(stations.to_vec()))
}

/// The canonical station of a city (the one named after the city).
async fn city_station(
    State(state): State<AppState>,
    Query(req): Query<CityQuery>,
) -> Result<Json<StationSummary>, AppError> {
    let station = state
        .index
        .city_station(&req.city)
        .ok_or_else(|| AppError::NotFound {
            message: format!("no canonical station for city: {}", req.city),
        })?;
    Ok(Json(station.clone()))
}

/// Look up a station by display name.
async fn station_by_name(
    State(state): State<AppState>,
    Query(req): Query<StationNameQuery>,
) -> Result<Json<StationSummary>, AppError> {
    let station = state
        .index
        .by_name(&req.name)
        .ok_or_else(|| AppError::NotFound {
            message: format!("station not found: {}", req.name),
        })?;
    Ok(Json(station.clone()))
}

/// Query left tickets and render the human-readable summary.
async fn query_tickets(
    State(state): State<AppState>,
    Query(req): Query<TicketQuery>,
) -> Result<String, AppError> {
    // All validation happens before any network call.
    let date = parse_travel_date(&req.date, Local::now().date_naive())?;

    for code in [&req.from, &req.to] {
        if !state.index.contains_code(code) {
            return Err(AppError::BadRequest {
                message: format!("unknown station code: {code}"),
            });
        }
    }

    let filter = CategoryFilter::parse(&req.filters).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let rows = state
        .rail
        .query_left_tickets(date, &req.from, &req.to)
        .await?;
    let tickets = convert_tickets(&rows, &state.index)?;
    let tickets = filter.apply(tickets);

    Ok(format_tickets(&tickets))
}

/// Query the stations a train calls at.
async fn query_route(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<Vec<RouteStationInfo>>, AppError> {
    let date = parse_date(&req.date)?;

    let waypoints = state
        .rail
        .query_route_stations(&req.train_no, &req.from, &req.to, date)
        .await?;
    let route = convert_route_stations(&waypoints)?;

    Ok(Json(route))
}

/// Parse a "yyyy-mm-dd" date parameter.
fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("invalid date: {date} (expected yyyy-mm-dd)"),
    })
}

/// Parse a travel date and reject dates earlier than today.
fn parse_travel_date(date: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    let parsed = parse_date(date)?;
    if parsed < today {
        return Err(AppError::BadRequest {
            message: "the travel date cannot be earlier than today".to_string(),
        });
    }
    Ok(parsed)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
}

impl From<RailError> for AppError {
    fn from(e: RailError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<DecodeError> for AppError {
    fn from(e: DecodeError) -> Self {
        // Decode inconsistencies are upstream data defects; the whole
        // request fails rather than serving a partial decode.
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        tracing::warn!(%status, %message, "request failed");

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn travel_date_today_is_accepted() {
        let date = parse_travel_date("2024-03-15", today()).unwrap();
        assert_eq!(date, today());
    }

    #[test]
    fn travel_date_in_future_is_accepted() {
        assert!(parse_travel_date("2024-04-01", today()).is_ok());
    }

    #[test]
    fn travel_date_in_past_is_rejected() {
        let err = parse_travel_date("2024-03-14", today()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(matches!(
            parse_travel_date("2024/03/15", today()),
            Err(AppError::BadRequest { .. })
        ));
        assert!(matches!(
            parse_travel_date("not-a-date", today()),
            Err(AppError::BadRequest { .. })
        ));
    }
}
