//! Request parameter types for the web layer.

use serde::Deserialize;

/// Parameters for the city station lookups.
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    /// City name, e.g. "北京"
    pub city: String,
}

/// Parameters for the station-by-name lookup.
#[derive(Debug, Deserialize)]
pub struct StationNameQuery {
    /// Station display name, e.g. "北京南" (a trailing "站" is accepted)
    pub name: String,
}

/// Parameters for a ticket query.
#[derive(Debug, Deserialize)]
pub struct TicketQuery {
    /// Travel date, "yyyy-mm-dd"; must not be earlier than today
    pub date: String,

    /// Origin station or city telecode
    pub from: String,

    /// Destination station or city telecode
    pub to: String,

    /// Category filter flags drawn from G/D/Z/T/K/O/F/S, at most 8
    #[serde(default)]
    pub filters: String,
}

/// Parameters for a route query.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Internal train identifier, e.g. "240000G10336"
    pub train_no: String,

    /// Origin station telecode (not a city code)
    pub from: String,

    /// Destination station telecode (not a city code)
    pub to: String,

    /// Departure date, "yyyy-mm-dd"
    pub date: String,
}
