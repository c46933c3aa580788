use thiserror::Error;

/// Unified error type for publish-gate operations
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Status query failed: {0}")]
    Status(String),

    #[error("Package index error: {0}")]
    Index(String),

    #[error("Step failed: {0}")]
    Step(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in publish-gate
pub type Result<T> = std::result::Result<T, GateError>;

impl GateError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GateError::Config(msg.into())
    }

    /// Create an invalid version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        GateError::InvalidVersion(msg.into())
    }

    /// Create a status query error with context
    pub fn status(msg: impl Into<String>) -> Self {
        GateError::Status(msg.into())
    }

    /// Create a package index error with context
    pub fn index(msg: impl Into<String>) -> Self {
        GateError::Index(msg.into())
    }

    /// Create a step execution error with context
    pub fn step(msg: impl Into<String>) -> Self {
        GateError::Step(msg.into())
    }
}
