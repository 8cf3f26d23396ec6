//! Error types for muxy-core

use thiserror::Error;

/// Result type alias for muxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the muxy HTTP server
///
/// Dispatch never returns one of these: a lookup miss is a 404 response and
/// handler failures are turned into responses by the handler itself.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid HTTP method
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Invalid path
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error (native only)
    #[cfg(feature = "native")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hyper error (native only)
    #[cfg(feature = "native")]
    #[error("HTTP error: {0}")]
    Hyper(String),
}
