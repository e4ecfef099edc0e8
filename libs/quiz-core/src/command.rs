//! Validated create commands for exercises.
//!
//! Each command can only be obtained through its constructor, which performs
//! every check for its exercise type. Storage and grading code therefore take
//! a command as already valid.

use std::collections::HashSet;

use crate::error::{Result, ValidationError};
use crate::types::{ExerciseType, BLANK_MARKER, MULTIPLE_CHOICE_COUNT};

/// Command to create one exercise of any type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateExerciseCommand {
    MultipleChoice(CreateMultipleChoiceExercise),
    FillInTheBlank(CreateFillInTheBlankExercise),
    SentenceCorrection(CreateSentenceCorrectionExercise),
}

impl CreateExerciseCommand {
    pub fn multiple_choice(
        question: String,
        choices: Vec<String>,
        answer: String,
        feedback: Option<String>,
    ) -> Result<Self> {
        CreateMultipleChoiceExercise::new(question, choices, answer, feedback)
            .map(Self::MultipleChoice)
    }

    pub fn fill_in_the_blank(
        question: String,
        answer: String,
        feedback: Option<String>,
    ) -> Result<Self> {
        CreateFillInTheBlankExercise::new(question, answer, feedback).map(Self::FillInTheBlank)
    }

    pub fn sentence_correction(
        sentence: String,
        corrected_sentence: String,
        feedback: Option<String>,
    ) -> Result<Self> {
        CreateSentenceCorrectionExercise::new(sentence, corrected_sentence, feedback)
            .map(Self::SentenceCorrection)
    }

    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Self::MultipleChoice(_) => ExerciseType::MultipleChoice,
            Self::FillInTheBlank(_) => ExerciseType::FillInTheBlank,
            Self::SentenceCorrection(_) => ExerciseType::SentenceCorrection,
        }
    }

    pub fn feedback(&self) -> Option<&str> {
        match self {
            Self::MultipleChoice(c) => c.feedback(),
            Self::FillInTheBlank(c) => c.feedback(),
            Self::SentenceCorrection(c) => c.feedback(),
        }
    }
}

/// Multiple choice: exactly four distinct choices, one of which is the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMultipleChoiceExercise {
    question: String,
    choices: Vec<String>,
    answer: String,
    feedback: Option<String>,
}

impl CreateMultipleChoiceExercise {
    pub fn new(
        question: String,
        choices: Vec<String>,
        answer: String,
        feedback: Option<String>,
    ) -> Result<Self> {
        require_text(&question, "question")?;
        if choices.len() != MULTIPLE_CHOICE_COUNT {
            return Err(ValidationError::ChoiceCount(choices.len()));
        }
        if let Some(duplicate) = find_duplicate(&choices) {
            return Err(ValidationError::DuplicateChoice(duplicate.to_string()));
        }
        if !choices.contains(&answer) {
            return Err(ValidationError::AnswerNotAChoice);
        }

        Ok(Self {
            question,
            choices,
            answer,
            feedback,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}

/// Fill in the blank: a question with exactly one blank marker, e.g.
/// `"This is a ______ truck."` answered by `"fire"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFillInTheBlankExercise {
    question: String,
    answer: String,
    feedback: Option<String>,
}

impl CreateFillInTheBlankExercise {
    pub fn new(question: String, answer: String, feedback: Option<String>) -> Result<Self> {
        match question.matches(BLANK_MARKER).count() {
            0 => return Err(ValidationError::NoBlank),
            1 => {}
            _ => return Err(ValidationError::MultipleBlanks),
        }

        Ok(Self {
            question,
            answer,
            feedback,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}

/// Sentence correction: a faulty sentence and its corrected form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSentenceCorrectionExercise {
    sentence: String,
    corrected_sentence: String,
    feedback: Option<String>,
}

impl CreateSentenceCorrectionExercise {
    pub fn new(
        sentence: String,
        corrected_sentence: String,
        feedback: Option<String>,
    ) -> Result<Self> {
        require_text(&sentence, "sentence")?;
        require_text(&corrected_sentence, "correctedSentence")?;
        if sentence == corrected_sentence {
            return Err(ValidationError::SentenceUnchanged);
        }

        Ok(Self {
            sentence,
            corrected_sentence,
            feedback,
        })
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn corrected_sentence(&self) -> &str {
        &self.corrected_sentence
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}

fn require_text(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

/// First value that appears a second time, in order.
fn find_duplicate(values: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Some(value.as_str());
        }
    }
    None
}
