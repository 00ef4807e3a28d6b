//! 12306 query HTTP client.
//!
//! The query endpoints are session-gated: they answer only when the
//! request carries cookies handed out by the booking site itself. Cookies
//! are fetched fresh for every query and never cached, so queries stay
//! independent and unordered.

use std::collections::HashMap;

use chrono::NaiveDate;
use reqwest::header::{COOKIE, SET_COOKIE};

use super::error::RailError;
use super::types::{LeftTicketReply, RouteReply, RouteStationData};

/// Default base URL of the booking platform.
const DEFAULT_BASE_URL: &str = "https://kyfw.12306.cn";

/// Configuration for the 12306 client.
#[derive(Debug, Clone)]
pub struct RailConfig {
    /// Base URL (defaults to the production booking site)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl RailConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 12306 query API client.
#[derive(Debug, Clone)]
pub struct RailClient {
    http: reqwest::Client,
    base_url: String,
}

impl RailClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RailConfig) -> Result<Self, RailError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch fresh session cookies from the base URL.
    pub async fn fetch_cookies(&self) -> Result<HashMap<String, String>, RailError> {
        let response = self.http.get(&self.base_url).send().await?;

        let cookies: HashMap<String, String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(parse_set_cookie)
            .collect();

        if cookies.is_empty() {
            return Err(RailError::NoSessionCookie);
        }
        Ok(cookies)
    }

    /// Query left tickets between two stations on a date.
    ///
    /// Returns the raw `|`-delimited ticket rows; decoding them is the
    /// caller's concern.
    pub async fn query_left_tickets(
        &self,
        date: NaiveDate,
        from_station: &str,
        to_station: &str,
    ) -> Result<Vec<String>, RailError> {
        let cookies = self.fetch_cookies().await?;
        let url = format!("{}/otn/leftTicket/query", self.base_url);

        let body = self
            .get_text(
                &url,
                &[
                    ("leftTicketDTO.train_date", date.format("%Y-%m-%d").to_string()),
                    ("leftTicketDTO.from_station", from_station.to_string()),
                    ("leftTicketDTO.to_station", to_station.to_string()),
                    ("purpose_codes", "ADULT".to_string()),
                ],
                &cookies,
            )
            .await?;

        let reply: LeftTicketReply =
            serde_json::from_str(&body).map_err(|e| RailError::Json {
                message: e.to_string(),
            })?;

        reply
            .data
            .map(|d| d.result)
            .ok_or(RailError::Rejected("left ticket query returned no data"))
    }

    /// Query the stations a train calls at between two telecodes.
    pub async fn query_route_stations(
        &self,
        train_no: &str,
        from_telecode: &str,
        to_telecode: &str,
        date: NaiveDate,
    ) -> Result<Vec<RouteStationData>, RailError> {
        let cookies = self.fetch_cookies().await?;
        let url = format!("{}/otn/czxx/queryByTrainNo", self.base_url);

        let body = self
            .get_text(
                &url,
                &[
                    ("train_no", train_no.to_string()),
                    ("from_station_telecode", from_telecode.to_string()),
                    ("to_station_telecode", to_telecode.to_string()),
                    ("depart_date", date.format("%Y-%m-%d").to_string()),
                ],
                &cookies,
            )
            .await?;

        let reply: RouteReply = serde_json::from_str(&body).map_err(|e| RailError::Json {
            message: e.to_string(),
        })?;

        reply
            .data
            .map(|d| d.data)
            .ok_or(RailError::Rejected("route query returned no data"))
    }

    async fn get_text(
        &self,
        url: &str,
        query: &[(&str, String)],
        cookies: &HashMap<String, String>,
    ) -> Result<String, RailError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(COOKIE, format_cookie_header(cookies))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

/// Parse one `Set-Cookie` header into a name/value pair.
///
/// Attributes after the first `;` (Path, HttpOnly, ...) are discarded.
fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

/// Render a cookie map as a `Cookie` request header value.
fn format_cookie_header(cookies: &HashMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
