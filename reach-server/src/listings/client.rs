//! HTTP client for the apprenticeship listings feed.

use crate::domain::Apprenticeship;

use super::error::ListingsError;

/// Client for fetching the listings feed.
#[derive(Debug, Clone)]
pub struct ListingsClient {
    http: reqwest::Client,
    url: String,
}

impl ListingsClient {
    pub fn new(url: impl Into<String>) -> Result<Self, ListingsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Fetch every listing in the feed.
    pub async fn fetch_all(&self) -> Result<Vec<Apprenticeship>, ListingsError> {
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingsError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ListingsError::Json {
            message: e.to_string(),
        })
    }
}
