//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{ApiError, Result};

// Re-export shared types from quiz-core
pub use quiz_core::{
    CreateExerciseCommand, CreateQuizCommand, CreateSectionCommand, Exercise, ExerciseBase,
    ExerciseType, FillInTheBlankExercise, GradeResult, LanguageTag, MultipleChoiceExercise, Quiz,
    Section, SentenceCorrectionExercise,
};

// === Database Entity Types ===

/// Quiz row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbQuiz {
    pub id: Uuid,
    pub name: String,
    pub language_tag: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbQuiz {
    /// Assemble the quiz aggregate from its already converted sections
    pub fn to_quiz(&self, sections: Vec<Section>) -> Result<Quiz> {
        let language_tag = LanguageTag::parse(&self.language_tag).map_err(|e| {
            ApiError::Internal(format!("quiz {} has a corrupt language tag: {}", self.id, e))
        })?;

        Ok(Quiz::new(
            self.id.to_string(),
            self.created_at,
            self.updated_at,
            self.name.clone(),
            language_tag,
            sections,
        ))
    }
}

/// Quiz section row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbQuizSection {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub position: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Exercise row in PostgreSQL.
///
/// All exercise types share one table; the columns a type does not use are NULL.
#[derive(Debug, Clone, FromRow)]
pub struct DbExercise {
    pub id: Uuid,
    pub quiz_section_id: Uuid,
    pub position: i32,
    pub exercise_type: String,
    pub feedback: Option<String>,
    pub question: Option<String>,
    pub choices: Option<Vec<String>>,
    pub answer: Option<String>,
    pub sentence: Option<String>,
    pub corrected_sentence: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbExercise {
    /// Reconstruct the core exercise from a stored row
    pub fn to_exercise(&self) -> Result<Exercise> {
        let exercise_type = ExerciseType::parse(&self.exercise_type).ok_or_else(|| {
            ApiError::Internal(format!(
                "exercise {} has unknown type: {}",
                self.id, self.exercise_type
            ))
        })?;

        let base = ExerciseBase::new(
            self.id.to_string(),
            self.created_at,
            self.updated_at,
            self.feedback.clone(),
        );

        let exercise = match exercise_type {
            ExerciseType::MultipleChoice => Exercise::MultipleChoice(MultipleChoiceExercise::new(
                base,
                self.column("question", &self.question)?,
                self.column("choices", &self.choices)?,
                self.column("answer", &self.answer)?,
            )),
            ExerciseType::FillInTheBlank => Exercise::FillInTheBlank(FillInTheBlankExercise::new(
                base,
                self.column("question", &self.question)?,
                self.column("answer", &self.answer)?,
            )),
            ExerciseType::SentenceCorrection => {
                Exercise::SentenceCorrection(SentenceCorrectionExercise::new(
                    base,
                    self.column("sentence", &self.sentence)?,
                    self.column("corrected_sentence", &self.corrected_sentence)?,
                ))
            }
        };

        Ok(exercise)
    }

    fn column<T: Clone>(&self, name: &str, value: &Option<T>) -> Result<T> {
        value.clone().ok_or_else(|| {
            ApiError::Internal(format!(
                "{} exercise {} is missing column {}",
                self.exercise_type, self.id, name
            ))
        })
    }
}

// === API Request Types ===

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ApiError::BadRequest(format!("field '{}' is missing", field)))
}

/// Request to create a quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub name: Option<String>,
    pub language_tag: Option<String>,
    pub sections: Option<Vec<CreateSectionRequest>>,
}

impl CreateQuizRequest {
    /// Validate the request into a create command
    pub fn into_command(self) -> Result<CreateQuizCommand> {
        let name = require(self.name, "name")?;
        let language_tag = LanguageTag::parse(&require(self.language_tag, "languageTag")?)?;
        let sections = require(self.sections, "sections")?
            .into_iter()
            .map(CreateSectionRequest::into_command)
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateQuizCommand::new(name, language_tag, sections)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    pub name: Option<String>,
    pub exercises: Option<Vec<CreateExerciseRequest>>,
}

impl CreateSectionRequest {
    pub fn into_command(self) -> Result<CreateSectionCommand> {
        let name = require(self.name, "name")?;
        let exercises = require(self.exercises, "exercises")?
            .into_iter()
            .map(CreateExerciseRequest::into_command)
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateSectionCommand::new(name, exercises)?)
    }
}

/// Raw exercise input; which fields are required depends on `type`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExerciseRequest {
    #[serde(rename = "type")]
    pub exercise_type: Option<String>,
    pub question: Option<String>,
    pub choices: Option<Vec<String>>,
    pub answer: Option<String>,
    pub sentence: Option<String>,
    pub corrected_sentence: Option<String>,
    pub feedback: Option<String>,
}

impl CreateExerciseRequest {
    /// Dispatch on the type tag and build the matching command
    pub fn into_command(self) -> Result<CreateExerciseCommand> {
        let tag = require(self.exercise_type, "type")?;
        let exercise_type = ExerciseType::parse(&tag)
            .ok_or_else(|| ApiError::BadRequest(format!("unsupported exercise type: {}", tag)))?;

        let command = match exercise_type {
            ExerciseType::MultipleChoice => CreateExerciseCommand::multiple_choice(
                require(self.question, "question")?,
                require(self.choices, "choices")?,
                non_empty(self.answer, "answer")?,
                self.feedback,
            )?,
            ExerciseType::FillInTheBlank => CreateExerciseCommand::fill_in_the_blank(
                require(self.question, "question")?,
                non_empty(self.answer, "answer")?,
                self.feedback,
            )?,
            ExerciseType::SentenceCorrection => CreateExerciseCommand::sentence_correction(
                require(self.sentence, "sentence")?,
                require(self.corrected_sentence, "correctedSentence")?,
                self.feedback,
            )?,
        };

        Ok(command)
    }
}

fn non_empty(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("field '{}' is missing", field))),
    }
}

/// Learner answers, one per exercise in quiz order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub user_answers: Option<Vec<Value>>,
}

// === API Response Types ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub language_tag: String,
    pub sections: Vec<SectionResponse>,
}

impl From<&Quiz> for QuizResponse {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id().to_string(),
            created_at: quiz.created_at(),
            name: quiz.name().to_string(),
            language_tag: quiz.language_tag().to_string(),
            sections: quiz.sections().iter().map(SectionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub name: String,
    pub exercises: Vec<ExerciseResponse>,
}

impl From<&Section> for SectionResponse {
    fn from(section: &Section) -> Self {
        Self {
            name: section.name().to_string(),
            exercises: section.exercises().iter().map(ExerciseResponse::from).collect(),
        }
    }
}

/// Learner facing view of an exercise; never includes the answer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
}

impl From<&Exercise> for ExerciseResponse {
    fn from(exercise: &Exercise) -> Self {
        let mut response = Self {
            id: exercise.id().to_string(),
            exercise_type: exercise.exercise_type(),
            question: None,
            choices: None,
            sentence: None,
        };
        match exercise {
            Exercise::MultipleChoice(e) => {
                response.question = Some(e.question().to_string());
                response.choices = Some(e.choices().to_vec());
            }
            Exercise::FillInTheBlank(e) => {
                response.question = Some(e.question().to_string());
            }
            Exercise::SentenceCorrection(e) => {
                response.sentence = Some(e.sentence().to_string());
            }
        }
        response
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswersResponse {
    pub results: Vec<GradeResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quiz_core::ValidationError;
    use serde_json::json;

    fn exercise_row(exercise_type: &str) -> DbExercise {
        DbExercise {
            id: Uuid::new_v4(),
            quiz_section_id: Uuid::new_v4(),
            position: 0,
            exercise_type: exercise_type.to_string(),
            feedback: None,
            question: None,
            choices: None,
            answer: None,
            sentence: None,
            corrected_sentence: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(value: serde_json::Value) -> CreateQuizRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_quiz_request_into_command() {
        let command = request(json!({
            "name": "Basics",
            "languageTag": "en-us",
            "sections": [{
                "name": "Animals",
                "exercises": [
                    {
                        "type": "multipleChoice",
                        "question": "Pick the animal",
                        "choices": ["Cat", "Dog", "Fish", "Bird"],
                        "answer": "Dog"
                    },
                    {
                        "type": "sentenceCorrection",
                        "sentence": "She go home.",
                        "correctedSentence": "She goes home.",
                        "feedback": "Third person takes -s."
                    }
                ]
            }]
        }))
        .into_command()
        .unwrap();

        assert_eq!(command.name(), "Basics");
        assert_eq!(command.language_tag().as_str(), "en-US");
        let exercises = command.sections()[0].exercises();
        assert_eq!(exercises[0].exercise_type(), ExerciseType::MultipleChoice);
        assert_eq!(exercises[1].feedback(), Some("Third person takes -s."));
    }

    #[test]
    fn test_missing_fields_are_bad_requests() {
        let err = request(json!({ "languageTag": "en", "sections": [] }))
            .into_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: field 'name' is missing");

        let err = CreateExerciseRequest {
            exercise_type: Some("fillInTheBlank".to_string()),
            question: Some("I ______ tea.".to_string()),
            ..Default::default()
        }
        .into_command()
        .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: field 'answer' is missing");
    }

    #[test]
    fn test_empty_text_is_rejected_by_core() {
        let err = CreateExerciseRequest {
            exercise_type: Some("multipleChoice".to_string()),
            question: Some(String::new()),
            choices: Some(vec!["A".into(), "B".into(), "C".into(), "D".into()]),
            answer: Some("A".to_string()),
            ..Default::default()
        }
        .into_command()
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::EmptyField("question"))));

        let err = CreateExerciseRequest {
            exercise_type: Some("sentenceCorrection".to_string()),
            sentence: Some("She go home.".to_string()),
            corrected_sentence: Some("  ".to_string()),
            ..Default::default()
        }
        .into_command()
        .unwrap_err();
        assert_eq!(err.to_string(), "field 'correctedSentence' is empty");
    }

    #[test]
    fn test_unknown_exercise_type_is_rejected() {
        let err = CreateExerciseRequest {
            exercise_type: Some("matching".to_string()),
            ..Default::default()
        }
        .into_command()
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.to_string(), "Bad request: unsupported exercise type: matching");
    }

    #[test]
    fn test_core_validation_errors_pass_through() {
        let err = CreateExerciseRequest {
            exercise_type: Some("fillInTheBlank".to_string()),
            question: Some("No gap here.".to_string()),
            answer: Some("x".to_string()),
            ..Default::default()
        }
        .into_command()
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "no blank found in question");

        let err = request(json!({ "name": "Q", "languageTag": "en_US", "sections": [] }))
            .into_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid language tag: en_US");
    }

    #[test]
    fn test_exercise_row_to_exercise() {
        let mut row = exercise_row("multipleChoice");
        row.question = Some("Pick the animal".to_string());
        row.choices = Some(vec!["Cat".into(), "Dog".into(), "Fish".into(), "Bird".into()]);
        row.answer = Some("Dog".to_string());
        row.feedback = Some("Dogs bark.".to_string());

        let exercise = row.to_exercise().unwrap();
        assert_eq!(exercise.id(), row.id.to_string());
        match &exercise {
            Exercise::MultipleChoice(e) => assert_eq!(e.choices().len(), 4),
            other => panic!("unexpected exercise: {:?}", other),
        }
        assert_eq!(exercise.base().feedback(), Some("Dogs bark."));
    }

    #[test]
    fn test_corrupt_exercise_rows_are_internal_errors() {
        let err = exercise_row("matching").to_exercise().unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));

        let mut row = exercise_row("sentenceCorrection");
        row.sentence = Some("She go home.".to_string());
        let err = row.to_exercise().unwrap_err();
        assert!(err.to_string().contains("corrected_sentence"));
    }

    #[test]
    fn test_exercise_response_hides_answers() {
        let mut row = exercise_row("fillInTheBlank");
        row.question = Some("This is a ______ truck.".to_string());
        row.answer = Some("fire".to_string());

        let response = ExerciseResponse::from(&row.to_exercise().unwrap());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({
                "id": row.id.to_string(),
                "type": "fillInTheBlank",
                "question": "This is a ______ truck."
            })
        );
    }
}
