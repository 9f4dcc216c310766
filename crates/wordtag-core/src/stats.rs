//! Character-level string statistics for word featurization.
//!
//! Derives 19 numeric descriptors from a single token (or short text),
//! feeding the "StringStatsOnWord" slice of the tagger's feature vector.
//! All fields are single-precision floats because the downstream feature
//! vector is `Float32`; counts are computed exactly and then widened.
//!
//! The exact numeric semantics here are load-bearing: models trained on
//! these features only reproduce their predictions if every field —
//! including the consonant predicate and the truncating word-length
//! average — is computed the same way. Do not "fix" a field without
//! retraining everything downstream.

use serde::Serialize;

/// The 19 per-token descriptors, in feature-vector order.
///
/// See [`compute_statistics`] for each field's definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StringStatistics {
    pub length: f32,
    pub vowel_count: f32,
    pub consonant_count: f32,
    pub number_count: f32,
    pub underscore_count: f32,
    pub letter_count: f32,
    pub word_count: f32,
    pub word_length_average: f32,
    pub line_count: f32,
    pub starts_with_vowel: f32,
    pub ends_in_vowel: f32,
    pub ends_in_vowel_number: f32,
    pub lower_case_count: f32,
    pub upper_case_count: f32,
    pub upper_case_percent: f32,
    pub letter_percent: f32,
    pub number_percent: f32,
    pub longest_repeating_char: f32,
    pub longest_repeating_vowel: f32,
}

impl StringStatistics {
    /// Fields as a flat array, ordered to match
    /// [`schema::STATISTIC_COLUMNS`](crate::schema::STATISTIC_COLUMNS).
    pub fn as_array(&self) -> [f32; 19] {
        [
            self.length,
            self.vowel_count,
            self.consonant_count,
            self.number_count,
            self.underscore_count,
            self.letter_count,
            self.word_count,
            self.word_length_average,
            self.line_count,
            self.starts_with_vowel,
            self.ends_in_vowel,
            self.ends_in_vowel_number,
            self.lower_case_count,
            self.upper_case_count,
            self.upper_case_percent,
            self.letter_percent,
            self.number_percent,
            self.longest_repeating_char,
            self.longest_repeating_vowel,
        ]
    }
}

/// Compute all 19 statistics for one text value.
///
/// Pure and deterministic; `O(n)` in the number of characters. The text is
/// taken as-is: no case folding, no whitespace normalisation.
///
/// Field definitions:
/// - `length`: total character count.
/// - `vowel_count`: characters in the fixed a/e/i/o/u set, either case.
/// - `consonant_count`: see [`is_counted_consonant`] — uppercase ASCII
///   vowels are included, deliberately.
/// - `number_count`: ASCII decimal digits.
/// - `underscore_count`: literal `_` characters.
/// - `letter_count`: Unicode alphabetic characters.
/// - `word_count`: separator characters (Unicode Zs/Zl/Zp) + 1, so
///   always ≥ 1. Line breaks are not separators here.
/// - `word_length_average`: `(length - word_count + 1) / word_count` with
///   truncating integer division. An approximation, not a true mean.
/// - `line_count`: `\n` characters + 1.
/// - `starts_with_vowel` / `ends_in_vowel` / `ends_in_vowel_number`:
///   1.0 or 0.0 flags; empty text gives 0.0.
/// - `lower_case_count` / `upper_case_count`: Unicode case classes.
/// - `upper_case_percent`: upper / letters, 0 when there are no letters.
/// - `letter_percent` / `number_percent`: over `length`, 0 when empty.
/// - `longest_repeating_char`: longest run of identical characters.
/// - `longest_repeating_vowel`: longest run of identical vowels, except
///   that a length-1 run only counts at the start of the text;
///   0 when the text contains no vowels.
pub fn compute_statistics(text: &str) -> StringStatistics {
    let chars: Vec<char> = text.chars().collect();
    let length = chars.len();

    let vowel_count = chars.iter().filter(|&&c| is_vowel(c)).count();
    let consonant_count = chars.iter().filter(|&&c| is_counted_consonant(c)).count();
    let number_count = chars.iter().filter(|c| c.is_ascii_digit()).count();
    let underscore_count = chars.iter().filter(|&&c| c == '_').count();
    let letter_count = chars.iter().filter(|c| c.is_alphabetic()).count();
    let word_count = chars.iter().filter(|&&c| is_separator(c)).count() + 1;
    let line_count = chars.iter().filter(|&&c| c == '\n').count() + 1;
    let lower_case_count = chars.iter().filter(|c| c.is_lowercase()).count();
    let upper_case_count = chars.iter().filter(|c| c.is_uppercase()).count();

    // Truncating integer division, on purpose.
    let word_length_average = (length as i64 - word_count as i64 + 1) / word_count as i64;

    let first = chars.first().copied();
    let last = chars.last().copied();

    StringStatistics {
        length: length as f32,
        vowel_count: vowel_count as f32,
        consonant_count: consonant_count as f32,
        number_count: number_count as f32,
        underscore_count: underscore_count as f32,
        letter_count: letter_count as f32,
        word_count: word_count as f32,
        word_length_average: word_length_average as f32,
        line_count: line_count as f32,
        starts_with_vowel: flag(first.is_some_and(is_vowel)),
        ends_in_vowel: flag(last.is_some_and(is_vowel)),
        ends_in_vowel_number: flag(last.is_some_and(|c| is_vowel(c) || c.is_ascii_digit())),
        lower_case_count: lower_case_count as f32,
        upper_case_count: upper_case_count as f32,
        upper_case_percent: ratio(upper_case_count, letter_count),
        letter_percent: ratio(letter_count, length),
        number_percent: ratio(number_count, length),
        longest_repeating_char: longest_run(&chars) as f32,
        longest_repeating_vowel: longest_vowel_run(&chars) as f32,
    }
}

/// One of a/e/i/o/u in either case. Fixed set, locale-independent.
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U')
}

/// The consonant predicate used by `consonant_count`.
///
/// Every uppercase ASCII letter counts, vowel or not; lowercase letters
/// are filtered against the vowel set. Kept exactly like this for
/// compatibility with models trained on the existing feature columns.
pub fn is_counted_consonant(c: char) -> bool {
    c.is_ascii_uppercase() || (c.is_ascii_lowercase() && !is_vowel(c))
}

/// Unicode separator classes Zs, Zl, and Zp.
///
/// Narrower than `char::is_whitespace`: `\t`, `\n`, and `\r` are control
/// characters, not separators, so line breaks do not add words — they
/// are tracked by `line_count` instead.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

/// numerator / denominator, or 0 when the denominator is 0.
fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

/// Length of the longest run of consecutive identical characters.
fn longest_run(chars: &[char]) -> usize {
    let mut max = 0;
    let mut run = 0;
    let mut prev = None;
    for &c in chars {
        run = if prev == Some(c) { run + 1 } else { 1 };
        prev = Some(c);
        max = max.max(run);
    }
    max
}

/// Length of the longest run of identical vowels, with a quirk: a run is
/// only credited once its length reaches 2, unless it starts at index 0.
/// A lone vowel in the middle of a word therefore scores 0 — "cat" and
/// "the" both give 0, while "ant" gives 1 and "aaaa" gives 4. Kept
/// exactly like this for compatibility with models trained on the
/// existing feature columns.
fn longest_vowel_run(chars: &[char]) -> usize {
    let mut max = 0;
    let mut run = 0;
    let mut prev = None;
    for (i, &c) in chars.iter().enumerate() {
        run = if prev == Some(c) { run + 1 } else { 1 };
        prev = Some(c);
        // run == i + 1 means the run spans from the first character.
        if is_vowel(c) && (run >= 2 || run == i + 1) {
            max = max.max(run);
        }
    }
    max
}
