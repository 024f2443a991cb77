use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("ingestion failed: {0}")]
    Parser(#[from] yawbench_parser::ParserError),

    #[error("polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("archive extraction failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("strategy '{strategy}' failed: {message}")]
    Strategy {
        strategy: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;
