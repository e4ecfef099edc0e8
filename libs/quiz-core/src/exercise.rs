//! Persisted exercises and answer grading.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::command::CreateExerciseCommand;
use crate::normalize::answers_match;
use crate::types::{ExerciseType, GradeResult};

/// Uniform grading contract shared by every exercise type.
pub trait Gradable {
    /// Whether the submitted answer is correct. Submissions that are not
    /// strings are graded as incorrect.
    fn check_answer(&self, submitted: &Value) -> bool;

    /// Canonical correct answer.
    fn answer(&self) -> &str;

    /// Author supplied explanation, if any.
    fn feedback(&self) -> Option<&str>;

    /// Grade a submission into a result for the learner.
    fn grade(&self, submitted: &Value) -> GradeResult {
        GradeResult {
            correct: self.check_answer(submitted),
            answer: self.answer().to_string(),
            feedback: self.feedback().map(str::to_string),
        }
    }
}

/// Fields common to all exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseBase {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    feedback: Option<String>,
}

impl ExerciseBase {
    pub fn new(
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        feedback: Option<String>,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            feedback,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceExercise {
    base: ExerciseBase,
    question: String,
    choices: Vec<String>,
    answer: String,
}

impl MultipleChoiceExercise {
    pub fn new(base: ExerciseBase, question: String, choices: Vec<String>, answer: String) -> Self {
        Self {
            base,
            question,
            choices,
            answer,
        }
    }

    pub fn base(&self) -> &ExerciseBase {
        &self.base
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl Gradable for MultipleChoiceExercise {
    /// Options are matched exactly, including case.
    fn check_answer(&self, submitted: &Value) -> bool {
        submitted.as_str() == Some(self.answer.as_str())
    }

    fn answer(&self) -> &str {
        &self.answer
    }

    fn feedback(&self) -> Option<&str> {
        self.base.feedback()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillInTheBlankExercise {
    base: ExerciseBase,
    question: String,
    answer: String,
}

impl FillInTheBlankExercise {
    pub fn new(base: ExerciseBase, question: String, answer: String) -> Self {
        Self {
            base,
            question,
            answer,
        }
    }

    pub fn base(&self) -> &ExerciseBase {
        &self.base
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

impl Gradable for FillInTheBlankExercise {
    fn check_answer(&self, submitted: &Value) -> bool {
        submitted
            .as_str()
            .is_some_and(|submitted| answers_match(submitted, &self.answer))
    }

    fn answer(&self) -> &str {
        &self.answer
    }

    fn feedback(&self) -> Option<&str> {
        self.base.feedback()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceCorrectionExercise {
    base: ExerciseBase,
    sentence: String,
    corrected_sentence: String,
}

impl SentenceCorrectionExercise {
    pub fn new(base: ExerciseBase, sentence: String, corrected_sentence: String) -> Self {
        Self {
            base,
            sentence,
            corrected_sentence,
        }
    }

    pub fn base(&self) -> &ExerciseBase {
        &self.base
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn corrected_sentence(&self) -> &str {
        &self.corrected_sentence
    }
}

impl Gradable for SentenceCorrectionExercise {
    fn check_answer(&self, submitted: &Value) -> bool {
        submitted
            .as_str()
            .is_some_and(|submitted| answers_match(submitted, &self.corrected_sentence))
    }

    fn answer(&self) -> &str {
        &self.corrected_sentence
    }

    fn feedback(&self) -> Option<&str> {
        self.base.feedback()
    }
}

/// An exercise of any type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exercise {
    MultipleChoice(MultipleChoiceExercise),
    FillInTheBlank(FillInTheBlankExercise),
    SentenceCorrection(SentenceCorrectionExercise),
}

impl Exercise {
    /// Build an exercise from a validated command once storage has assigned
    /// it an identity. Both timestamps are set to `created_at`.
    pub fn from_command(id: String, created_at: DateTime<Utc>, cmd: CreateExerciseCommand) -> Self {
        let base = ExerciseBase::new(
            id,
            created_at,
            created_at,
            cmd.feedback().map(str::to_string),
        );
        match cmd {
            CreateExerciseCommand::MultipleChoice(c) => {
                Self::MultipleChoice(MultipleChoiceExercise::new(
                    base,
                    c.question().to_string(),
                    c.choices().to_vec(),
                    c.answer().to_string(),
                ))
            }
            CreateExerciseCommand::FillInTheBlank(c) => {
                Self::FillInTheBlank(FillInTheBlankExercise::new(
                    base,
                    c.question().to_string(),
                    c.answer().to_string(),
                ))
            }
            CreateExerciseCommand::SentenceCorrection(c) => {
                Self::SentenceCorrection(SentenceCorrectionExercise::new(
                    base,
                    c.sentence().to_string(),
                    c.corrected_sentence().to_string(),
                ))
            }
        }
    }

    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Self::MultipleChoice(_) => ExerciseType::MultipleChoice,
            Self::FillInTheBlank(_) => ExerciseType::FillInTheBlank,
            Self::SentenceCorrection(_) => ExerciseType::SentenceCorrection,
        }
    }

    pub fn base(&self) -> &ExerciseBase {
        match self {
            Self::MultipleChoice(e) => e.base(),
            Self::FillInTheBlank(e) => e.base(),
            Self::SentenceCorrection(e) => e.base(),
        }
    }

    pub fn id(&self) -> &str {
        self.base().id()
    }

    fn as_gradable(&self) -> &dyn Gradable {
        match self {
            Self::MultipleChoice(e) => e,
            Self::FillInTheBlank(e) => e,
            Self::SentenceCorrection(e) => e,
        }
    }
}

impl Gradable for Exercise {
    fn check_answer(&self, submitted: &Value) -> bool {
        self.as_gradable().check_answer(submitted)
    }

    fn answer(&self) -> &str {
        self.as_gradable().answer()
    }

    fn feedback(&self) -> Option<&str> {
        self.as_gradable().feedback()
    }
}
