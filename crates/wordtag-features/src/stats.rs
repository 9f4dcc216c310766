//! String-statistics stage: `text` → 19 Float32 descriptor columns.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Array};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;

use wordtag_core::compute_statistics;
use wordtag_core::schema::{STATISTIC_COLUMNS, TEXT_COLUMN};

use crate::error::StageError;
use crate::stage::{FeatureStage, utf8_values, with_columns};

/// Computes [`wordtag_core::StringStatistics`] for every row's `text`
/// value and appends one Float32 column per descriptor, named per
/// [`STATISTIC_COLUMNS`]. Null text is treated as the empty string.
#[derive(Default)]
pub struct StringStatisticsStage;

impl StringStatisticsStage {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureStage for StringStatisticsStage {
    fn name(&self) -> &str {
        "string_statistics"
    }

    fn transform(&self, batch: &RecordBatch) -> Result<RecordBatch, StageError> {
        let texts = utf8_values(batch, TEXT_COLUMN)?;

        let rows: Vec<[f32; 19]> = texts
            .iter()
            .map(|t| compute_statistics(t.unwrap_or("")).as_array())
            .collect();

        let additions = STATISTIC_COLUMNS
            .iter()
            .enumerate()
            .map(|(k, &name)| {
                let values: Float32Array = rows.iter().map(|r| r[k]).collect();
                (
                    Field::new(name, DataType::Float32, false),
                    Arc::new(values) as ArrayRef,
                )
            })
            .collect();

        with_columns(batch, additions)
    }
}
