use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReguloError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}")]
    UpstreamStatus { service: String, status: u16 },

    #[error("{service} unavailable: {reason}")]
    Unavailable { service: String, reason: String },

    #[error("Invalid variant identifier: {0}")]
    InvalidVariant(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ReguloError>;
