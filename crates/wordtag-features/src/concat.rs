//! Feature-vector composition: concatenate numeric columns into one
//! `FixedSizeList<Float32>` column.
//!
//! Input columns are consumed in the order given, so the resulting slot
//! layout is deterministic; the trained model addresses slots by position.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, FixedSizeListArray, FixedSizeListBuilder, Float32Array, Float32Builder,
};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;

use crate::error::StageError;
use crate::stage::{FeatureStage, with_columns};

/// Concatenates scalar `Float32` columns and `FixedSizeList<Float32>`
/// columns into a single fixed-width vector column.
pub struct ConcatStage {
    inputs: Vec<String>,
    output: String,
}

/// A resolved input column: either one slot or a fixed-width block.
enum Source<'a> {
    Scalar(&'a Float32Array),
    Vector(&'a FixedSizeListArray, usize),
}

impl Source<'_> {
    fn width(&self) -> usize {
        match self {
            Source::Scalar(_) => 1,
            Source::Vector(_, w) => *w,
        }
    }
}

impl ConcatStage {
    pub fn new<S: Into<String>>(inputs: impl IntoIterator<Item = S>, output: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: output.into(),
        }
    }

    fn resolve<'a>(&self, batch: &'a RecordBatch) -> Result<Vec<Source<'a>>, StageError> {
        self.inputs
            .iter()
            .map(|name| {
                let col = batch
                    .column_by_name(name)
                    .ok_or_else(|| StageError::MissingColumn(name.clone()))?;
                match col.data_type() {
                    DataType::Float32 => {
                        let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
                        Ok(Source::Scalar(arr))
                    }
                    DataType::FixedSizeList(item, width)
                        if item.data_type() == &DataType::Float32 =>
                    {
                        let arr = col.as_any().downcast_ref::<FixedSizeListArray>().unwrap();
                        Ok(Source::Vector(arr, *width as usize))
                    }
                    other => Err(StageError::ColumnType {
                        column: name.clone(),
                        expected: "Float32 or FixedSizeList<Float32>",
                        actual: other.clone(),
                    }),
                }
            })
            .collect()
    }
}

impl FeatureStage for ConcatStage {
    fn name(&self) -> &str {
        "concat_features"
    }

    fn transform(&self, batch: &RecordBatch) -> Result<RecordBatch, StageError> {
        let sources = self.resolve(batch)?;
        let total_width: usize = sources.iter().map(Source::width).sum();

        let mut builder = FixedSizeListBuilder::new(Float32Builder::new(), total_width as i32);

        for row in 0..batch.num_rows() {
            for (source, name) in sources.iter().zip(&self.inputs) {
                match source {
                    Source::Scalar(arr) => {
                        if arr.is_null(row) {
                            return Err(StageError::NullValue {
                                column: name.clone(),
                                row,
                            });
                        }
                        builder.values().append_value(arr.value(row));
                    }
                    Source::Vector(arr, _) => {
                        if arr.is_null(row) {
                            return Err(StageError::NullValue {
                                column: name.clone(),
                                row,
                            });
                        }
                        let slots = arr.value(row);
                        let slots = slots.as_any().downcast_ref::<Float32Array>().unwrap();
                        for i in 0..slots.len() {
                            builder.values().append_value(slots.value(i));
                        }
                    }
                }
            }
            builder.append(true);
        }

        let field = Field::new(
            &self.output,
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                total_width as i32,
            ),
            false,
        );
        with_columns(batch, vec![(field, Arc::new(builder.finish()) as ArrayRef)])
    }
}
