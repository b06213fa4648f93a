use thiserror::Error;

pub type Result<T> = std::result::Result<T, DevdashError>;

#[derive(Error, Debug)]
pub enum DevdashError {
    /// An upstream data source failed or returned nothing usable.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
