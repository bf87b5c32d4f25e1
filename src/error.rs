use thiserror::Error;

/// Unified error type for publish-version operations
///
/// Every variant is terminal for a single run: nothing is retried or
/// downgraded, and the binary maps all of them to a non-zero exit code.
#[derive(Error, Debug)]
pub enum PublishVersionError {
    /// Manifest or configuration missing or unparseable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Registry transport failure or an error-bearing response
    #[error("Network error: {0}")]
    Network(String),

    /// Registry document without a resolvable "latest" version
    #[error("Data error: {0}")]
    Data(String),

    /// Malformed version string on either side
    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in publish-version
pub type Result<T> = std::result::Result<T, PublishVersionError>;

impl PublishVersionError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        PublishVersionError::Configuration(msg.into())
    }

    /// Create a network error with context
    pub fn network(msg: impl Into<String>) -> Self {
        PublishVersionError::Network(msg.into())
    }

    /// Create a data error with context
    pub fn data(msg: impl Into<String>) -> Self {
        PublishVersionError::Data(msg.into())
    }

    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        PublishVersionError::Parse(msg.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<reqwest::Error> for PublishVersionError {
    fn from(err: reqwest::Error) -> Self {
        PublishVersionError::Network(err.to_string())
    }
}
