//! Text normalization for free-text answers.
//!
//! Learner input is compared after three steps: the typographic apostrophe
//! (U+2019) is replaced with `'`, surrounding whitespace is trimmed and the
//! whole string is lowercased. Accents and inner whitespace are untouched.

/// Right single quotation mark inserted by many mobile keyboards.
const TYPOGRAPHIC_APOSTROPHE: char = '\u{2019}';

/// Normalize an answer for comparison.
pub fn normalize_answer(answer: &str) -> String {
    answer
        .replace(TYPOGRAPHIC_APOSTROPHE, "'")
        .trim()
        .to_lowercase()
}

/// Whether two answers are equal after normalization.
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(expected)
}
