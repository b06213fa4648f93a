use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorldBankError>;

#[derive(Debug, Error)]
pub enum WorldBankError {
    #[error("World Bank request failed: {0}")]
    Network(String),

    #[error("World Bank API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("World Bank returned non-JSON content ({0})")]
    UnexpectedContentType(String),

    #[error("World Bank response could not be parsed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WorldBankError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WorldBankError::Parse(err.to_string())
        } else {
            WorldBankError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WorldBankError {
    fn from(err: serde_json::Error) -> Self {
        WorldBankError::Parse(err.to_string())
    }
}
