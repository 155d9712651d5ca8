/// Lofty engine errors
use thiserror::Error;

/// Result type alias using `LoftyEngineError`
pub type Result<T> = std::result::Result<T, LoftyEngineError>;

/// Lofty engine error types
#[derive(Error, Debug)]
pub enum LoftyEngineError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}
