//! Error types for the application

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Sensor error: {0}")]
    Sensor(String),

    #[error("Instrumentation error: {0}")]
    Instrumentation(String),

    #[error("Sampler is already running")]
    AlreadyRunning,

    #[error("Sampler error: {0}")]
    Sampler(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
