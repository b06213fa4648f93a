use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhoError>;

#[derive(Debug, Error)]
pub enum GhoError {
    #[error("GHO request failed: {0}")]
    Network(String),

    #[error("GHO API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("GHO returned non-JSON content ({0})")]
    UnexpectedContentType(String),

    #[error("GHO response could not be parsed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GhoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GhoError::Parse(err.to_string())
        } else {
            GhoError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GhoError {
    fn from(err: serde_json::Error) -> Self {
        GhoError::Parse(err.to_string())
    }
}
