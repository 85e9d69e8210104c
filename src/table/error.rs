use chrono::NaiveDateTime;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Hourly series '{column}' has {found} entries, expected {expected} (one per timestamp)")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Failed to parse hourly timestamp '{0}'")]
    InvalidTimestamp(String, #[source] chrono::ParseError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No hourly data for {0}")]
    NoCurrentData(NaiveDateTime),

    #[error("Hourly data for {0} is the first row, there is no previous hour")]
    NoPreviousSample(NaiveDateTime),
}
