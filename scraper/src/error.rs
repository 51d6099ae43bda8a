use thiserror::Error;

/// Why a GET produced no usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status code: {0}")]
    Status(u16),
}
