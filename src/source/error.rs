use thiserror::Error;

/// Why a single strategy could not produce slides.
///
/// None of these ever reach the user; the strategy chain logs them and moves
/// on to the next tier.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0} produced no slides")]
    Empty(&'static str),

    #[error("no proxy endpoint configured")]
    NoProxy,
}

pub type Result<T> = std::result::Result<T, FetchError>;
