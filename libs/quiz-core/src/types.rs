//! Core types shared by commands, exercises and the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker that denotes the gap in a fill-in-the-blank question.
pub const BLANK_MARKER: &str = "______";

/// Number of choices a multiple choice exercise must offer.
pub const MULTIPLE_CHOICE_COUNT: usize = 4;

/// Exercise type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseType {
    MultipleChoice,
    FillInTheBlank,
    SentenceCorrection,
}

impl ExerciseType {
    /// Get the type tag as used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multipleChoice",
            Self::FillInTheBlank => "fillInTheBlank",
            Self::SentenceCorrection => "sentenceCorrection",
        }
    }

    /// Parse from a type tag.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "multipleChoice" => Some(Self::MultipleChoice),
            "fillInTheBlank" => Some(Self::FillInTheBlank),
            "sentenceCorrection" => Some(Self::SentenceCorrection),
            _ => None,
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub correct: bool,
    /// Canonical correct answer, shown to the learner.
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
