//! Tabular data ingestion: tab-separated training/test files → Arrow.

mod error;
mod tsv;

pub use error::DataError;
pub use tsv::{read_tsv, read_tsv_from};
