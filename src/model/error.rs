use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid data received: {0}")]
    InvalidData(String),
    #[error("Internal error: {0}")]
    InternalError(String),
    #[error("Engine runtime is not running")]
    EngineUnavailable,
    #[error("Failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for NetworkError {
    fn from(e: serde_json::Error) -> Self {
        NetworkError::InvalidData(e.to_string())
    }
}
