use thiserror::Error;

/// creatrack error types
#[derive(Error, Debug)]
pub enum CreatrackError {
    /// Failed to parse a JSON export file
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Row failed ingestion validation
    #[error("ingest error: {0}")]
    Ingest(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for creatrack
pub type Result<T> = std::result::Result<T, CreatrackError>;
