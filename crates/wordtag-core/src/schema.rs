//! Arrow schema and fixed column names for the tagging dataset.
//!
//! Column names are wired into downstream concatenation and must not be
//! renamed; the trained model addresses feature slices by these exact
//! identifiers.

use arrow::datatypes::{DataType, Field, Schema};

/// Input column holding the text a stage operates on.
pub const TEXT_COLUMN: &str = "text";
/// Input column holding the target word's index within the sentence.
pub const WORD_NUM_COLUMN: &str = "WordNum";
/// Output column: sentence before the target word.
pub const CONTEXT_BEFORE_COLUMN: &str = "ContextBefore";
/// Output column: sentence after the target word.
pub const CONTEXT_AFTER_COLUMN: &str = "ContextAfter";

/// String-statistics output columns, in [`StringStatistics::as_array`]
/// order.
///
/// [`StringStatistics::as_array`]: crate::stats::StringStatistics::as_array
pub const STATISTIC_COLUMNS: [&str; 19] = [
    "length",
    "vowelCount",
    "consonantCount",
    "numberCount",
    "underscoreCount",
    "letterCount",
    "wordCount",
    "wordLengthAverage",
    "lineCount",
    "startsWithVowel",
    "endsInVowel",
    "endsInVowelNumber",
    "lowerCaseCount",
    "upperCaseCount",
    "upperCasePercent",
    "letterPercent",
    "numberPercent",
    "longestRepeatingChar",
    "longestRepeatingVowel",
];

/// Schema for the tab-separated training/test files.
///
/// One row per target word: its label, its index in the sentence, the
/// word itself, and the full sentence.
pub fn model_input_schema() -> Schema {
    Schema::new(vec![
        Field::new("Label", DataType::Utf8, true),
        Field::new(WORD_NUM_COLUMN, DataType::Float32, false),
        Field::new("Word", DataType::Utf8, true),
        Field::new("Context", DataType::Utf8, true),
    ])
}
