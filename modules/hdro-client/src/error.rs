use thiserror::Error;

pub type Result<T> = std::result::Result<T, HdroError>;

#[derive(Debug, Error)]
pub enum HdroError {
    #[error("HDRO request failed: {0}")]
    Network(String),

    #[error("HDRO API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The API answered 2xx with something other than JSON, usually an HTML error page.
    #[error("HDRO returned non-JSON content ({0})")]
    UnexpectedContentType(String),

    #[error("HDRO response could not be parsed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for HdroError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            HdroError::Parse(err.to_string())
        } else {
            HdroError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HdroError {
    fn from(err: serde_json::Error) -> Self {
        HdroError::Parse(err.to_string())
    }
}
