use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid API credential for {0}")]
    InvalidCredential(String),
    #[error("Image error: {0}")]
    ImageError(String),
    #[error("Render error: {0}")]
    RenderError(String),
}

pub type Result<T> = std::result::Result<T, StudioError>;
