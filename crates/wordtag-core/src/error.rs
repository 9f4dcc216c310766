use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("word index {index} out of range for sentence with {token_count} tokens")]
    WordIndexOutOfRange { index: usize, token_count: usize },

    #[error("word index must be an integral value, got {0}")]
    FractionalWordIndex(f32),

    #[error("word index must be non-negative, got {0}")]
    NegativeWordIndex(f32),
}
