//! Min-max scaling of the assembled feature vector.
//!
//! Two-step shape: [`MinMaxNormalizer::fit`] learns per-slot minima and
//! maxima from training batches, and the fitted normalizer is then a
//! regular [`FeatureStage`] that rescales each slot to `[0, 1]`. The fit
//! is the only stateful step in the pipeline; applying the fitted stage
//! is pure.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, FixedSizeListArray, FixedSizeListBuilder, Float32Array, Float32Builder,
};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::error::StageError;
use crate::stage::{FeatureStage, with_columns};

#[derive(Debug)]
pub struct MinMaxNormalizer {
    column: String,
    mins: Vec<f32>,
    maxs: Vec<f32>,
}

impl MinMaxNormalizer {
    /// Learn per-slot minima and maxima for a `FixedSizeList<Float32>`
    /// column over a set of batches. Fails with [`StageError::EmptyFit`]
    /// when the batches contain no rows.
    pub fn fit(column: &str, batches: &[RecordBatch]) -> Result<Self, StageError> {
        let mut mins: Vec<f32> = Vec::new();
        let mut maxs: Vec<f32> = Vec::new();
        let mut rows = 0usize;

        for batch in batches {
            let arr = fixed_size_list_column(batch, column)?;
            let width = arr.value_length() as usize;
            if mins.is_empty() {
                mins = vec![f32::INFINITY; width];
                maxs = vec![f32::NEG_INFINITY; width];
            } else if width != mins.len() {
                return Err(StageError::ColumnType {
                    column: column.to_string(),
                    expected: "FixedSizeList<Float32> of consistent width",
                    actual: arr.data_type().clone(),
                });
            }

            for row in 0..arr.len() {
                if arr.is_null(row) {
                    return Err(StageError::NullValue {
                        column: column.to_string(),
                        row,
                    });
                }
                let slots = arr.value(row);
                let slots = slots.as_any().downcast_ref::<Float32Array>().unwrap();
                for (slot, (min, max)) in mins.iter_mut().zip(maxs.iter_mut()).enumerate() {
                    let v = slots.value(slot);
                    if v < *min {
                        *min = v;
                    }
                    if v > *max {
                        *max = v;
                    }
                }
                rows += 1;
            }
        }

        if rows == 0 {
            return Err(StageError::EmptyFit);
        }

        debug!(column, width = mins.len(), rows, "fitted min-max normalizer");
        Ok(Self {
            column: column.to_string(),
            mins,
            maxs,
        })
    }

    /// Slot count the normalizer was fitted for.
    pub fn width(&self) -> usize {
        self.mins.len()
    }

    fn scale(&self, slot: usize, value: f32) -> f32 {
        let (min, max) = (self.mins[slot], self.maxs[slot]);
        if max == min {
            // Constant slot carries no signal; pin it to 0.
            0.0
        } else {
            (value - min) / (max - min)
        }
    }
}

impl FeatureStage for MinMaxNormalizer {
    fn name(&self) -> &str {
        "min_max_normalize"
    }

    fn transform(&self, batch: &RecordBatch) -> Result<RecordBatch, StageError> {
        let arr = fixed_size_list_column(batch, &self.column)?;
        let width = arr.value_length() as usize;
        if width != self.width() {
            return Err(StageError::ColumnType {
                column: self.column.clone(),
                expected: "FixedSizeList<Float32> of fitted width",
                actual: arr.data_type().clone(),
            });
        }

        let mut builder = FixedSizeListBuilder::new(Float32Builder::new(), width as i32);
        for row in 0..arr.len() {
            if arr.is_null(row) {
                return Err(StageError::NullValue {
                    column: self.column.clone(),
                    row,
                });
            }
            let slots = arr.value(row);
            let slots = slots.as_any().downcast_ref::<Float32Array>().unwrap();
            for slot in 0..width {
                builder.values().append_value(self.scale(slot, slots.value(slot)));
            }
            builder.append(true);
        }

        let field = Field::new(
            &self.column,
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                width as i32,
            ),
            false,
        );
        with_columns(batch, vec![(field, Arc::new(builder.finish()) as ArrayRef)])
    }
}

fn fixed_size_list_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a FixedSizeListArray, StageError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| StageError::MissingColumn(name.to_string()))?;
    col.as_any()
        .downcast_ref::<FixedSizeListArray>()
        .ok_or_else(|| StageError::ColumnType {
            column: name.to_string(),
            expected: "FixedSizeList<Float32>",
            actual: col.data_type().clone(),
        })
}
