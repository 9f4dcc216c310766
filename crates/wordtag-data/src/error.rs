use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("input file not found: {0}")]
    FileNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
