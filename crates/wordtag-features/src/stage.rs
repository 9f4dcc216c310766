//! The stage trait plus column-access helpers shared by all stages.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float32Array, LargeStringArray, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::StageError;

/// One step of the feature pipeline: a pure, deterministic mapping from
/// a batch to a batch with derived columns appended.
///
/// Implementations bind input and output columns by fixed names; there is
/// no reflection, the field sets are known at design time.
pub trait FeatureStage: Send + Sync {
    fn name(&self) -> &str;

    fn transform(&self, batch: &RecordBatch) -> Result<RecordBatch, StageError>;
}

/// Copy a column under a new name, replacing any existing column of that
/// name. Used to wire one stage's output into the fixed input name the
/// next stage binds (e.g. `Word` → `text`).
pub struct ColumnCopyStage {
    from: String,
    to: String,
}

impl ColumnCopyStage {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl FeatureStage for ColumnCopyStage {
    fn name(&self) -> &str {
        "copy_column"
    }

    fn transform(&self, batch: &RecordBatch) -> Result<RecordBatch, StageError> {
        let schema = batch.schema();
        let idx = schema
            .index_of(&self.from)
            .map_err(|_| StageError::MissingColumn(self.from.clone()))?;
        let source_field = schema.field(idx);
        let field = Field::new(
            &self.to,
            source_field.data_type().clone(),
            source_field.is_nullable(),
        );
        with_columns(batch, vec![(field, Arc::clone(batch.column(idx)))])
    }
}

/// Rebuild a batch with the given columns appended, replacing any
/// same-named existing columns in place.
pub(crate) fn with_columns(
    batch: &RecordBatch,
    additions: Vec<(Field, ArrayRef)>,
) -> Result<RecordBatch, StageError> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();

    for (field, column) in additions {
        match schema.index_of(field.name()) {
            Ok(idx) => {
                fields[idx] = field;
                columns[idx] = column;
            }
            Err(_) => {
                fields.push(field);
                columns.push(column);
            }
        }
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Extract a string column's values, handling both `Utf8` and `LargeUtf8`.
/// Nulls come back as `None`.
pub(crate) fn utf8_values<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<Vec<Option<&'a str>>, StageError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| StageError::MissingColumn(name.to_string()))?;

    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Ok((0..arr.len())
            .map(|i| (!arr.is_null(i)).then(|| arr.value(i)))
            .collect())
    } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        Ok((0..arr.len())
            .map(|i| (!arr.is_null(i)).then(|| arr.value(i)))
            .collect())
    } else {
        Err(StageError::ColumnType {
            column: name.to_string(),
            expected: "Utf8",
            actual: col.data_type().clone(),
        })
    }
}

/// Borrow a `Float32` column.
pub(crate) fn float32_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float32Array, StageError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| StageError::MissingColumn(name.to_string()))?;
    col.as_any()
        .downcast_ref::<Float32Array>()
        .ok_or_else(|| StageError::ColumnType {
            column: name.to_string(),
            expected: "Float32",
            actual: col.data_type().clone(),
        })
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use arrow::datatypes::DataType;

    /// Build a batch with a Utf8 `text` column and a Float32 `WordNum`
    /// column, mirroring what the ingestion layer hands the pipeline.
    pub fn text_batch(rows: &[(&str, f32)]) -> RecordBatch {
        let texts: StringArray = rows.iter().map(|(t, _)| Some(*t)).collect();
        let nums: Float32Array = rows.iter().map(|(_, n)| Some(*n)).collect();
        let schema = Schema::new(vec![
            Field::new("text", DataType::Utf8, true),
            Field::new("WordNum", DataType::Float32, false),
        ]);
        RecordBatch::try_new(Arc::new(schema), vec![Arc::new(texts), Arc::new(nums)]).unwrap()
    }

    /// Single Utf8 column batch.
    pub fn utf8_batch(name: &str, values: &[Option<&str>]) -> RecordBatch {
        let arr: StringArray = values.iter().copied().collect();
        let schema = Schema::new(vec![Field::new(name, DataType::Utf8, true)]);
        RecordBatch::try_new(Arc::new(schema), vec![Arc::new(arr)]).unwrap()
    }
}
