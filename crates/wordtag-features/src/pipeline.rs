//! Sequential stage composition under an explicit pipeline context.

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wordtag_core::schema::{STATISTIC_COLUMNS, WORD_NUM_COLUMN};

use crate::concat::ConcatStage;
use crate::context::ContextStage;
use crate::error::StageError;
use crate::stage::{ColumnCopyStage, FeatureStage};
use crate::stats::StringStatisticsStage;

/// Name of the assembled feature-vector column.
pub const FEATURES_COLUMN: &str = "Features";

/// Shared configuration for one training/featurization run.
///
/// The seed is not consumed by the deterministic stages here; it is
/// carried explicitly so the downstream trainer and any hashing encoders
/// draw from one recorded value instead of process-wide state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PipelineContext {
    pub seed: u64,
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self { seed: 1 }
    }
}

/// An ordered list of stages applied batch by batch.
pub struct FeaturePipeline {
    context: PipelineContext,
    stages: Vec<Box<dyn FeatureStage>>,
}

impl FeaturePipeline {
    pub fn new(context: PipelineContext) -> Self {
        Self {
            context,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, stage: Box<dyn FeatureStage>) -> &mut Self {
        self.stages.push(stage);
        self
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run every stage over one batch, in order.
    pub fn transform_batch(&self, batch: &RecordBatch) -> Result<RecordBatch, StageError> {
        let mut current = batch.clone();
        for stage in &self.stages {
            current = stage.transform(&current)?;
            debug!(
                stage = stage.name(),
                columns = current.num_columns(),
                rows = current.num_rows(),
                "applied stage"
            );
        }
        Ok(current)
    }

    /// Run the pipeline over a whole dataset. Rows are independent, so
    /// batches are processed one at a time with no cross-batch state.
    pub fn transform(&self, batches: &[RecordBatch]) -> Result<Vec<RecordBatch>, StageError> {
        batches.iter().map(|b| self.transform_batch(b)).collect()
    }
}

/// Assemble the word-tagging featurization pipeline:
///
/// 1. `Word` → `text`, string statistics on the target word;
/// 2. `Context` → `text`, before/after context split;
/// 3. concatenate the 19 statistics and `WordNum` into [`FEATURES_COLUMN`].
///
/// The `ContextBefore`/`ContextAfter` columns stay as strings for the
/// external n-gram featurizers; everything numeric lands in the feature
/// vector.
pub fn word_tagging_pipeline(context: PipelineContext) -> FeaturePipeline {
    let mut pipeline = FeaturePipeline::new(context);
    pipeline
        .push(Box::new(ColumnCopyStage::new("Word", "text")))
        .push(Box::new(StringStatisticsStage::new()))
        .push(Box::new(ColumnCopyStage::new("Context", "text")))
        .push(Box::new(ContextStage::new()))
        .push(Box::new(ConcatStage::new(
            STATISTIC_COLUMNS
                .iter()
                .copied()
                .chain([WORD_NUM_COLUMN]),
            FEATURES_COLUMN,
        )));

    info!(
        seed = context.seed,
        stages = pipeline.stage_count(),
        "assembled word-tagging pipeline"
    );
    pipeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, FixedSizeListArray, Float32Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    /// One row per target word, as loaded from the TSV.
    fn dataset(rows: &[(&str, f32, &str, &str)]) -> RecordBatch {
        let labels: StringArray = rows.iter().map(|r| Some(r.0)).collect();
        let nums: Float32Array = rows.iter().map(|r| Some(r.1)).collect();
        let words: StringArray = rows.iter().map(|r| Some(r.2)).collect();
        let contexts: StringArray = rows.iter().map(|r| Some(r.3)).collect();
        let schema = Schema::new(vec![
            Field::new("Label", DataType::Utf8, true),
            Field::new("WordNum", DataType::Float32, false),
            Field::new("Word", DataType::Utf8, true),
            Field::new("Context", DataType::Utf8, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(labels),
                Arc::new(nums),
                Arc::new(words),
                Arc::new(contexts),
            ],
        )
        .unwrap()
    }

    fn features(batch: &RecordBatch, row: usize) -> Vec<f32> {
        let arr = batch
            .column_by_name(FEATURES_COLUMN)
            .unwrap()
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .unwrap();
        let slots = arr.value(row);
        let slots = slots.as_any().downcast_ref::<Float32Array>().unwrap();
        (0..slots.len()).map(|i| slots.value(i)).collect()
    }

    fn utf8(batch: &RecordBatch, name: &str, row: usize) -> String {
        batch
            .column_by_name(name)
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
            .value(row)
            .to_string()
    }

    #[test]
    fn end_to_end_featurization() {
        let batch = dataset(&[
            ("NOUN", 3.0, "fox", "the quick brown fox jumps"),
            ("DET", 0.0, "the", "the quick brown fox jumps"),
        ]);

        let pipeline = word_tagging_pipeline(PipelineContext::default());
        let out = pipeline.transform_batch(&batch).unwrap();

        // Context columns come from the sentence, not the word.
        assert_eq!(utf8(&out, "ContextBefore", 0), "the quick brown");
        assert_eq!(utf8(&out, "ContextAfter", 0), "jumps");
        assert_eq!(utf8(&out, "ContextBefore", 1), "");
        assert_eq!(utf8(&out, "ContextAfter", 1), "quick brown fox jumps");

        // Feature vector: 19 statistics + WordNum.
        let f = features(&out, 0);
        assert_eq!(f.len(), 20);
        assert_eq!(f[0], 3.0); // length of "fox"
        assert_eq!(f[1], 1.0); // one vowel
        assert_eq!(f[19], 3.0); // WordNum rides along as the last slot

        // Statistics were computed on the word, before `text` was
        // overwritten with the sentence.
        let f1 = features(&out, 1);
        assert_eq!(f1[0], 3.0); // "the"
        assert_eq!(f1[19], 0.0);
    }

    #[test]
    fn transform_handles_multiple_batches() {
        let a = dataset(&[("X", 0.0, "a", "a b")]);
        let b = dataset(&[("Y", 1.0, "b", "a b")]);
        let pipeline = word_tagging_pipeline(PipelineContext::default());
        let out = pipeline.transform(&[a, b]).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(features(&out[0], 0).len(), 20);
    }

    #[test]
    fn rows_are_independent_and_deterministic() {
        let batch = dataset(&[("N", 1.0, "brown", "the brown fox")]);
        let pipeline = word_tagging_pipeline(PipelineContext::default());
        let once = pipeline.transform_batch(&batch).unwrap();
        let twice = pipeline.transform_batch(&batch).unwrap();
        assert_eq!(features(&once, 0), features(&twice, 0));
    }

    #[test]
    fn bad_word_num_propagates() {
        let batch = dataset(&[("N", 9.0, "fox", "too short")]);
        let pipeline = word_tagging_pipeline(PipelineContext::default());
        let err = pipeline.transform_batch(&batch).unwrap_err();
        assert!(matches!(err, StageError::Row { row: 0, .. }));
    }

    #[test]
    fn default_context_seed_is_one() {
        assert_eq!(PipelineContext::default().seed, 1);
    }
}
