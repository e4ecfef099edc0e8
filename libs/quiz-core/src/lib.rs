//! Core library for the language quiz backend.
//!
//! Provides:
//! - Validated create commands for exercises and quizzes
//! - The exercise model (multiple choice, fill in the blank, sentence correction)
//! - Answer grading with text normalization
//! - Quiz aggregate types and BCP-47 language tags

pub mod command;
pub mod error;
pub mod exercise;
pub mod language;
pub mod normalize;
pub mod quiz;
pub mod types;

pub use command::{
    CreateExerciseCommand, CreateFillInTheBlankExercise, CreateMultipleChoiceExercise,
    CreateSentenceCorrectionExercise,
};
pub use error::{Result, ValidationError};
pub use exercise::{
    Exercise, ExerciseBase, FillInTheBlankExercise, Gradable, MultipleChoiceExercise,
    SentenceCorrectionExercise,
};
pub use language::LanguageTag;
pub use normalize::{answers_match, normalize_answer};
pub use quiz::{CreateQuizCommand, CreateSectionCommand, Quiz, Section};
pub use types::{ExerciseType, GradeResult, BLANK_MARKER, MULTIPLE_CHOICE_COUNT};
