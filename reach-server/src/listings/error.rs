//! Errors from the listings feed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listings feed returned status {status}")]
    Api { status: u16 },

    #[error("failed to parse listings feed: {message}")]
    Json { message: String },
}
