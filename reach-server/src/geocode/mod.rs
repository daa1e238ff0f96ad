//! Address search against the Swisstopo geocoding API.

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api3.geo.admin.ch/rest/services/api/SearchServer";

/// Queries shorter than this never hit the network.
const MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoding API returned status {status}")]
    Api { status: u16 },
    #[error("failed to parse geocoding response: {message}")]
    Json { message: String },
}

/// One address the query matched.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressMatch {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    attrs: SearchAttrs,
}

#[derive(Debug, Deserialize)]
struct SearchAttrs {
    label: String,
    lat: f64,
    lon: f64,
}

/// Configuration for [`GeocodeClient`].
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Search endpoint URL.
    pub base_url: String,
    /// Maximum number of matches to request.
    pub limit: u8,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: 5,
            timeout_secs: 10,
        }
    }
}

/// Client for Swisstopo location search.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    config: GeocodeConfig,
}

impl GeocodeClient {
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Search for addresses matching `query`.
    ///
    /// Queries shorter than three characters return no matches without
    /// a network call. Highlight markup in returned labels is stripped.
    pub async fn search(&self, query: &str) -> Result<Vec<AddressMatch>, GeocodeError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let limit = self.config.limit.to_string();
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("searchText", query),
                ("type", "locations"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| AddressMatch {
                label: strip_highlight_tags(&r.attrs.label),
                lat: r.attrs.lat,
                lng: r.attrs.lon,
            })
            .collect())
    }
}

/// Remove the `<b>` highlight markup the search API embeds in labels.
fn strip_highlight_tags(label: &str) -> String {
    label.replace("<b>", "").replace("</b>", "")
}
