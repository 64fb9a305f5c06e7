use thiserror::Error;

/// Unified error type for ci-version operations
#[derive(Error, Debug)]
pub enum CiVersionError {
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git query failed: {0}")]
    Git(String),

    #[error("Descriptor parse error: {0}")]
    Describe(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in ci-version
pub type Result<T> = std::result::Result<T, CiVersionError>;

impl CiVersionError {
    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        CiVersionError::Environment(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CiVersionError::Config(msg.into())
    }

    /// Create a git query error with context
    pub fn git(msg: impl Into<String>) -> Self {
        CiVersionError::Git(msg.into())
    }

    /// Create a descriptor parse error with context
    pub fn describe(msg: impl Into<String>) -> Self {
        CiVersionError::Describe(msg.into())
    }
}
