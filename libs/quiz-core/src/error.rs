//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while building create commands from author input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected 4 choices, found: {0}")]
    ChoiceCount(usize),

    #[error("duplicate choice found: {0}")]
    DuplicateChoice(String),

    #[error("answer is not a choice")]
    AnswerNotAChoice,

    #[error("no blank found in question")]
    NoBlank,

    #[error("more than one blank found in question")]
    MultipleBlanks,

    #[error("sentence and correctedSentence are the same")]
    SentenceUnchanged,

    #[error("invalid language tag: {0}")]
    InvalidLanguageTag(String),

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_author_facing_text() {
        assert_eq!(
            ValidationError::ChoiceCount(3).to_string(),
            "expected 4 choices, found: 3"
        );
        assert_eq!(
            ValidationError::DuplicateChoice("Cat".to_string()).to_string(),
            "duplicate choice found: Cat"
        );
        assert_eq!(ValidationError::NoBlank.to_string(), "no blank found in question");
        assert_eq!(
            ValidationError::EmptyField("sections").to_string(),
            "field 'sections' is empty"
        );
    }
}
