use thiserror::Error;

/// weekgrid error types
#[derive(Error, Debug)]
pub enum WeekgridError {
    /// Failed to parse a grid file or JSON document
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WeekgridError {
    fn from(err: serde_json::Error) -> Self {
        WeekgridError::Parse(err.to_string())
    }
}

/// Result type alias for weekgrid
pub type Result<T> = std::result::Result<T, WeekgridError>;
