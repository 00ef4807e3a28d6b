//! Station table fetching.
//!
//! The station list is not served from a documented endpoint: the 12306
//! index page references a generated `station_name...js` script whose only
//! content is one giant string literal holding the flat table. We locate
//! the script, fetch it, and pull the payload out of the literal without
//! ever evaluating the fetched code.

use std::sync::LazyLock;

use regex::Regex;

use super::error::StationError;

/// Default base URL of the 12306 index page referencing the station script.
const DEFAULT_WEB_URL: &str = "https://www.12306.cn/index/";

/// Configuration for the station table client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Base URL of the index page
    pub web_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self {
            web_url: DEFAULT_WEB_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl StationClientConfig {
    /// Set a custom base URL (for testing).
    pub fn with_web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = url.into();
        self
    }
}

/// Client that fetches and extracts the raw station table.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    web_url: String,
}

impl StationClient {
    /// Create a new station table client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            web_url: config.web_url,
        })
    }

    /// Fetch the raw station table string.
    ///
    /// Two sequential fetches: the index page (to locate the script path)
    /// and the script itself. Any failure here is surfaced to the caller,
    /// which treats it as fatal at startup.
    pub async fn fetch_raw_table(&self) -> Result<String, StationError> {
        let html = self.fetch_text(&self.web_url, "index page").await?;
        let script_path = find_script_path(&html).ok_or(StationError::ScriptNotFound)?;

        let script_url = join_url(&self.web_url, script_path);
        let script = self.fetch_text(&script_url, "station script").await?;

        extract_station_literal(&script)
    }

    async fn fetch_text(&self, url: &str, what: &'static str) -> Result<String, StationError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StationError::Upstream {
                status: status.as_u16(),
                what,
            });
        }
        Ok(response.text().await?)
    }
}

/// Matches the versioned script path, e.g.
/// /script/core/common/station_name_v10102.js
static SCRIPT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/script/core/common/station_name[^'\x22\s]*?\.js")
        .expect("station script pattern is valid")
});

/// Locate the station-name script path inside the index page HTML.
fn find_script_path(html: &str) -> Option<&str> {
    SCRIPT_PATH.find(html).map(|m| m.as_str())
}

/// Resolve a script path against the index page URL.
fn join_url(web_url: &str, path: &str) -> String {
    // Paths in the page are host-absolute; keep only the scheme + host.
    let origin = web_url
        .find("://")
        .and_then(|scheme_end| {
            web_url[scheme_end + 3..]
                .find('/')
                .map(|host_end| &web_url[..scheme_end + 3 + host_end])
        })
        .unwrap_or(web_url);
    format!("{}{}", origin.trim_end_matches('/'), path)
}

/// Extract the station table payload from the generated script.
///
/// The script has the fixed shape `var station_names = '<payload>';`.
/// This is a structured parse of exactly that shape: an assignment to
/// `station_names` followed by a single quoted string literal. The fetched
/// code is data here, never executed.
fn extract_station_literal(script: &str) -> Result<String, StationError> {
    let after_name = script
        .split_once("station_names")
        .ok_or(StationError::BadScript("no station_names assignment"))?
        .1;
    let after_eq = after_name
        .split_once('=')
        .ok_or(StationError::BadScript("no assignment operator"))?
        .1;

    let mut chars = after_eq.char_indices().skip_while(|(_, c)| c.is_whitespace());
    let (start, quote) = chars
        .next()
        .ok_or(StationError::BadScript("assignment has no value"))?;
    if quote != '\'' && quote != '"' {
        return Err(StationError::BadScript("value is not a string literal"));
    }

    let body = &after_eq[start + 1..];
    let mut payload = String::with_capacity(body.len());
    let mut escaped = false;
    for c in body.chars() {
        if escaped {
            payload.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok(payload);
        } else {
            payload.push(c);
        }
    }
    Err(StationError::BadScript("unterminated string literal"))
}
