use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("filename '{filename}' does not match the Turbine_Data_<farm>_<turbine>_*.csv pattern")]
    FilenamePattern { filename: String },

    #[error("required column '{column}' missing from SCADA file '{filename}'")]
    MissingColumn {
        column: &'static str,
        filename: String,
    },

    #[error("data row {line_index} has invalid timestamp '{value}'")]
    Timestamp { line_index: usize, value: String },

    #[error("data row {line_index} has invalid value '{value}' in column '{column}'")]
    DataRow {
        line_index: usize,
        column: &'static str,
        value: String,
    },

    #[error("no SCADA data files found for wind farm '{wind_farm}'")]
    NoDataFiles { wind_farm: String },

    #[error("data directory path is not valid UTF-8: '{path}'")]
    InvalidDataDir { path: String },

    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
