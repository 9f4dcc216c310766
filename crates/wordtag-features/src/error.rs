use arrow::datatypes::DataType;
use thiserror::Error;

use wordtag_core::FeatureError;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("column {column} has type {actual:?}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: DataType,
    },

    #[error("column {column} has a null at row {row}")]
    NullValue { column: String, row: usize },

    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: FeatureError,
    },

    #[error("cannot fit normalizer: no rows")]
    EmptyFit,

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
