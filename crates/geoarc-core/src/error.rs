use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoArcError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Integrity violation: {0}")]
    Integrity(String),
}

pub type Result<T> = std::result::Result<T, GeoArcError>;
