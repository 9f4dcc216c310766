//! Context stage: `text` + `WordNum` → `ContextBefore` / `ContextAfter`.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;

use wordtag_core::schema::{
    CONTEXT_AFTER_COLUMN, CONTEXT_BEFORE_COLUMN, TEXT_COLUMN, WORD_NUM_COLUMN,
};
use wordtag_core::{split_context, word_index_from_f32};

use crate::error::StageError;
use crate::stage::{FeatureStage, float32_column, utf8_values, with_columns};

/// Splits each row's sentence around the target word, producing the two
/// string columns the downstream n-gram featurizers consume.
///
/// `WordNum` must be an exact non-negative integer within the sentence's
/// token count; anything else fails the whole batch with the offending
/// row's index attached.
#[derive(Default)]
pub struct ContextStage;

impl ContextStage {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureStage for ContextStage {
    fn name(&self) -> &str {
        "split_context"
    }

    fn transform(&self, batch: &RecordBatch) -> Result<RecordBatch, StageError> {
        let sentences = utf8_values(batch, TEXT_COLUMN)?;
        let word_nums = float32_column(batch, WORD_NUM_COLUMN)?;

        let mut before = Vec::with_capacity(batch.num_rows());
        let mut after = Vec::with_capacity(batch.num_rows());

        for (row, sentence) in sentences.iter().enumerate() {
            if word_nums.is_null(row) {
                return Err(StageError::NullValue {
                    column: WORD_NUM_COLUMN.to_string(),
                    row,
                });
            }
            let index = word_index_from_f32(word_nums.value(row))
                .map_err(|source| StageError::Row { row, source })?;
            let pair = split_context(sentence.unwrap_or(""), index)
                .map_err(|source| StageError::Row { row, source })?;
            before.push(pair.before);
            after.push(pair.after);
        }

        with_columns(
            batch,
            vec![
                (
                    Field::new(CONTEXT_BEFORE_COLUMN, DataType::Utf8, false),
                    Arc::new(StringArray::from(before)) as ArrayRef,
                ),
                (
                    Field::new(CONTEXT_AFTER_COLUMN, DataType::Utf8, false),
                    Arc::new(StringArray::from(after)) as ArrayRef,
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::test_util::text_batch;
    use wordtag_core::FeatureError;

    fn utf8_col(batch: &RecordBatch, name: &str) -> Vec<String> {
        let arr = batch
            .column_by_name(name)
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        (0..arr.len()).map(|i| arr.value(i).to_string()).collect()
    }

    #[test]
    fn splits_each_row() {
        let batch = text_batch(&[
            ("the quick brown fox", 2.0),
            ("the quick brown fox", 0.0),
            ("word", 0.0),
        ]);
        let out = ContextStage::new().transform(&batch).unwrap();

        assert_eq!(
            utf8_col(&out, "ContextBefore"),
            vec!["the quick", "", ""],
        );
        assert_eq!(
            utf8_col(&out, "ContextAfter"),
            vec!["fox", "quick brown fox", ""],
        );
    }

    #[test]
    fn out_of_range_index_names_the_row() {
        let batch = text_batch(&[("ok sentence", 0.0), ("one two", 5.0)]);
        let err = ContextStage::new().transform(&batch).unwrap_err();
        match err {
            StageError::Row { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(
                    source,
                    FeatureError::WordIndexOutOfRange {
                        index: 5,
                        token_count: 2
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fractional_word_num_fails() {
        let batch = text_batch(&[("one two", 0.5)]);
        let err = ContextStage::new().transform(&batch).unwrap_err();
        assert!(matches!(
            err,
            StageError::Row {
                row: 0,
                source: FeatureError::FractionalWordIndex(_)
            }
        ));
    }

    #[test]
    fn negative_word_num_fails() {
        let batch = text_batch(&[("one two", -1.0)]);
        let err = ContextStage::new().transform(&batch).unwrap_err();
        assert!(matches!(
            err,
            StageError::Row {
                row: 0,
                source: FeatureError::NegativeWordIndex(_)
            }
        ));
    }

    #[test]
    fn missing_word_num_column_fails() {
        let batch = crate::stage::test_util::utf8_batch("text", &[Some("a b")]);
        let err = ContextStage::new().transform(&batch).unwrap_err();
        assert!(matches!(err, StageError::MissingColumn(c) if c == "WordNum"));
    }
}
