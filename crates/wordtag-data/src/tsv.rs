//! TSV reader for tagging datasets.
//!
//! Files are tab-separated with a header row and double-quote quoting,
//! decoded against [`wordtag_core::schema::model_input_schema`].

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use tracing::info;

use wordtag_core::schema::model_input_schema;

use crate::DataError;

const BATCH_SIZE: usize = 4096;

/// Read a tagging dataset from a TSV file on disk.
pub fn read_tsv(path: &Path) -> Result<Vec<RecordBatch>, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let batches = read_tsv_from(file)?;
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    info!(rows, path = %path.display(), "read tagging dataset");
    Ok(batches)
}

/// Read a tagging dataset from any reader (used by tests with in-memory
/// buffers).
pub fn read_tsv_from<R: Read>(input: R) -> Result<Vec<RecordBatch>, DataError> {
    let reader = ReaderBuilder::new(Arc::new(model_input_schema()))
        .with_header(true)
        .with_delimiter(b'\t')
        .with_quote(b'"')
        .with_batch_size(BATCH_SIZE)
        .build(input)?;

    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}
