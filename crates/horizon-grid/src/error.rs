//! Error types for the grid data-binding layer.
//!
//! Most grid operations degrade silently instead of failing: filtered-out
//! selections are dropped and mismatched field/header lengths produce empty
//! columns. The errors here cover the few entry points that parse external
//! input or address a column explicitly.

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the grid data-binding layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Row data was not an array of objects.
    #[error("Invalid row data: {message}")]
    InvalidRows { message: String },

    /// Row data could not be parsed as JSON.
    #[error("Failed to parse row data: {0}")]
    Json(#[from] serde_json::Error),

    /// Grid configuration could not be parsed.
    #[error("Invalid grid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A column index does not address an existing column.
    #[error("Column {index} is out of range (column count {count})")]
    ColumnOutOfRange { index: usize, count: usize },
}

impl Error {
    /// Create an invalid rows error.
    pub fn invalid_rows(message: impl Into<String>) -> Self {
        Self::InvalidRows {
            message: message.into(),
        }
    }

    /// Create a column range error.
    pub fn column_out_of_range(index: usize, count: usize) -> Self {
        Self::ColumnOutOfRange { index, count }
    }
}
