//! Routing engine error types.

/// Errors from the routing engine and its data loading.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Data blob fetch returned an error status
    #[error("engine data fetch failed for {url}: status {status}")]
    Fetch { url: String, status: u16 },

    /// Engine data could not be decoded
    #[error("failed to decode engine data: {message}")]
    Decode { message: String },

    /// Origin stop is not known to the engine
    #[error("unknown origin stop: {0}")]
    UnknownStop(String),

    /// The engine worker thread is no longer running
    #[error("engine worker stopped")]
    WorkerStopped,
}
