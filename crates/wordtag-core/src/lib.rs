pub mod context;
pub mod error;
pub mod schema;
pub mod stats;

pub use context::{ContextPair, split_context, word_index_from_f32};
pub use error::FeatureError;
pub use stats::{StringStatistics, compute_statistics};
