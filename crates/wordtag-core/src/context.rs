//! Before/after context extraction for a target word in a sentence.
//!
//! Splits strictly on the literal space character `' '`, not general
//! whitespace. This deliberately differs from the separator class used by
//! [`stats`](crate::stats) word counting; downstream n-gram featurization
//! was trained against exactly this tokenisation.

use crate::error::FeatureError;

/// The sentence on either side of the target word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPair {
    pub before: String,
    pub after: String,
}

/// Split `sentence` around the token at `word_index`.
///
/// Tokens are maximal runs of non-space characters, as produced by
/// splitting on `' '`; consecutive spaces therefore produce empty tokens,
/// and an empty sentence is one empty token. `before` is tokens
/// `[0, word_index)` re-joined with single spaces, `after` is tokens
/// `(word_index, end]`.
///
/// Fails fast with [`FeatureError::WordIndexOutOfRange`] rather than
/// clamping: a bad index means the row's `WordNum` column disagrees with
/// its sentence, which should surface, not silently truncate context.
pub fn split_context(sentence: &str, word_index: usize) -> Result<ContextPair, FeatureError> {
    let tokens: Vec<&str> = sentence.split(' ').collect();
    if word_index >= tokens.len() {
        return Err(FeatureError::WordIndexOutOfRange {
            index: word_index,
            token_count: tokens.len(),
        });
    }

    Ok(ContextPair {
        before: tokens[..word_index].join(" "),
        after: tokens[word_index + 1..].join(" "),
    })
}

/// Coerce a `WordNum` column value to a token index.
///
/// The value arrives as `Float32` from the tabular layer but must be an
/// exact non-negative integer.
pub fn word_index_from_f32(value: f32) -> Result<usize, FeatureError> {
    if value < 0.0 {
        return Err(FeatureError::NegativeWordIndex(value));
    }
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(FeatureError::FractionalWordIndex(value));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_word() {
        let pair = split_context("the quick brown fox", 2).unwrap();
        assert_eq!(pair.before, "the quick");
        assert_eq!(pair.after, "fox");
    }

    #[test]
    fn first_word_has_empty_before() {
        let pair = split_context("the quick brown fox", 0).unwrap();
        assert_eq!(pair.before, "");
        assert_eq!(pair.after, "quick brown fox");
    }

    #[test]
    fn last_word_has_empty_after() {
        let pair = split_context("the quick brown fox", 3).unwrap();
        assert_eq!(pair.before, "the quick brown");
        assert_eq!(pair.after, "");
    }

    #[test]
    fn single_token_sentence() {
        let pair = split_context("word", 0).unwrap();
        assert_eq!(pair.before, "");
        assert_eq!(pair.after, "");
    }

    #[test]
    fn empty_sentence_is_one_empty_token() {
        let pair = split_context("", 0).unwrap();
        assert_eq!(pair.before, "");
        assert_eq!(pair.after, "");
    }

    #[test]
    fn out_of_range_fails() {
        let err = split_context("one two", 2).unwrap_err();
        assert_eq!(
            err,
            FeatureError::WordIndexOutOfRange {
                index: 2,
                token_count: 2
            }
        );
    }

    #[test]
    fn tabs_are_not_separators() {
        // Only the literal space splits; the tab stays inside one token.
        let pair = split_context("a\tb c", 1).unwrap();
        assert_eq!(pair.before, "a\tb");
        assert_eq!(pair.after, "");
    }

    #[test]
    fn consecutive_spaces_yield_empty_tokens() {
        let pair = split_context("a  b", 1).unwrap();
        assert_eq!(pair.before, "a");
        assert_eq!(pair.after, "b");
    }

    #[test]
    fn round_trip_rejoins_sentence() {
        let sentence = "mark the third word here";
        let tokens: Vec<&str> = sentence.split(' ').collect();
        for idx in 0..tokens.len() {
            let pair = split_context(sentence, idx).unwrap();
            let mut parts = Vec::new();
            if !pair.before.is_empty() {
                parts.push(pair.before.as_str());
            }
            parts.push(tokens[idx]);
            if !pair.after.is_empty() {
                parts.push(pair.after.as_str());
            }
            assert_eq!(parts.join(" "), sentence, "index {idx}");
        }
    }

    #[test]
    fn index_coercion_exact_integral() {
        assert_eq!(word_index_from_f32(0.0).unwrap(), 0);
        assert_eq!(word_index_from_f32(3.0).unwrap(), 3);
    }

    #[test]
    fn index_coercion_rejects_fractional() {
        assert_eq!(
            word_index_from_f32(1.5).unwrap_err(),
            FeatureError::FractionalWordIndex(1.5)
        );
        assert!(matches!(
            word_index_from_f32(f32::NAN).unwrap_err(),
            FeatureError::FractionalWordIndex(_)
        ));
    }

    #[test]
    fn index_coercion_rejects_negative() {
        assert_eq!(
            word_index_from_f32(-1.0).unwrap_err(),
            FeatureError::NegativeWordIndex(-1.0)
        );
    }
}
