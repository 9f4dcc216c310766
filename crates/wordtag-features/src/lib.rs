//! Feature-stage layer: per-row featurizers lifted onto Arrow RecordBatches.
//!
//! Each [`FeatureStage`] maps one batch to a new batch, appending (or
//! replacing) named columns; a [`FeaturePipeline`] composes stages
//! sequentially. Stages are stateless and rows are independent, so any
//! batching or parallel scheduling above this layer is fine.

mod concat;
mod context;
mod error;
mod normalize;
mod pipeline;
mod stage;
mod stats;

pub use concat::ConcatStage;
pub use context::ContextStage;
pub use error::StageError;
pub use normalize::MinMaxNormalizer;
pub use pipeline::{FEATURES_COLUMN, FeaturePipeline, PipelineContext, word_tagging_pipeline};
pub use stage::{ColumnCopyStage, FeatureStage};
pub use stats::StringStatisticsStage;
