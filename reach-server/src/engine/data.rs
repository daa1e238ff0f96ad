//! Fetching the data blobs the routing engine is built from.

use tracing::debug;

use super::error::EngineError;

/// The two opaque blobs a routing engine is constructed from.
#[derive(Clone)]
pub struct EngineData {
    /// Timetable blob, in whatever format the engine expects.
    pub timetable: Vec<u8>,
    /// Stop registry blob.
    pub stops: Vec<u8>,
}

/// Configuration for [`EngineDataClient`].
#[derive(Debug, Clone)]
pub struct EngineDataConfig {
    /// Where to fetch the timetable blob from.
    pub timetable_url: String,
    /// Where to fetch the stop registry blob from.
    pub stops_url: String,
    /// Request timeout in seconds. The blobs can be large, so this is
    /// more generous than the other clients' timeouts.
    pub timeout_secs: u64,
}

impl EngineDataConfig {
    pub fn new(timetable_url: impl Into<String>, stops_url: impl Into<String>) -> Self {
        Self {
            timetable_url: timetable_url.into(),
            stops_url: stops_url.into(),
            timeout_secs: 60,
        }
    }
}

/// HTTP client for downloading engine data.
#[derive(Debug, Clone)]
pub struct EngineDataClient {
    http: reqwest::Client,
    config: EngineDataConfig,
}

impl EngineDataClient {
    pub fn new(config: EngineDataConfig) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Download both blobs concurrently.
    pub async fn fetch(&self) -> Result<EngineData, EngineError> {
        debug!(
            timetable_url = %self.config.timetable_url,
            stops_url = %self.config.stops_url,
            "Fetching engine data"
        );

        let (timetable, stops) = futures::try_join!(
            self.fetch_blob(&self.config.timetable_url),
            self.fetch_blob(&self.config.stops_url),
        )?;

        debug!(
            timetable_bytes = timetable.len(),
            stops_bytes = stops.len(),
            "Engine data fetched"
        );

        Ok(EngineData { timetable, stops })
    }

    async fn fetch_blob(&self, url: &str) -> Result<Vec<u8>, EngineError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Where engine data comes from.
///
/// Production fetches over HTTP; tests hand the blobs in directly.
pub enum EngineDataSource {
    Remote(EngineDataClient),
    Preloaded(EngineData),
}

impl EngineDataSource {
    pub async fn load(&self) -> Result<EngineData, EngineError> {
        match self {
            Self::Remote(client) => client.fetch().await,
            Self::Preloaded(data) => Ok(data.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_timeout() {
        let config = EngineDataConfig::new("http://example.com/tt", "http://example.com/stops");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.timetable_url, "http://example.com/tt");
    }

    #[tokio::test]
    async fn preloaded_source_returns_data() {
        let source = EngineDataSource::Preloaded(EngineData {
            timetable: vec![1, 2, 3],
            stops: vec![4, 5],
        });

        let data = source.load().await.unwrap();
        assert_eq!(data.timetable, vec![1, 2, 3]);
        assert_eq!(data.stops, vec![4, 5]);
    }
}
