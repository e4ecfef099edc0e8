//! Quiz aggregate: a named, language-tagged sequence of sections.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::command::CreateExerciseCommand;
use crate::error::{Result, ValidationError};
use crate::exercise::{Exercise, Gradable};
use crate::language::LanguageTag;
use crate::types::GradeResult;

/// A named, ordered group of exercises. Exercise types may be mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    exercises: Vec<Exercise>,
}

impl Section {
    pub fn new(name: String, exercises: Vec<Exercise>) -> Self {
        Self { name, exercises }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    language_tag: LanguageTag,
    sections: Vec<Section>,
}

impl Quiz {
    pub fn new(
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        name: String,
        language_tag: LanguageTag,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            name,
            language_tag,
            sections,
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language_tag(&self) -> &LanguageTag {
        &self.language_tag
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All exercises in section order.
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.sections.iter().flat_map(|s| s.exercises.iter())
    }

    pub fn exercise_count(&self) -> usize {
        self.sections.iter().map(|s| s.exercises.len()).sum()
    }

    /// Grade answers positionally against [`Quiz::exercises`], one result per
    /// submitted answer. Exercises past the last answer are not graded, so
    /// their answers stay hidden; extra answers are ignored.
    pub fn grade(&self, answers: &[Value]) -> Vec<GradeResult> {
        self.exercises()
            .zip(answers)
            .map(|(exercise, answer)| exercise.grade(answer))
            .collect()
    }
}

/// Command to create a quiz with all of its sections and exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuizCommand {
    name: String,
    language_tag: LanguageTag,
    sections: Vec<CreateSectionCommand>,
}

impl CreateQuizCommand {
    pub fn new(
        name: String,
        language_tag: LanguageTag,
        sections: Vec<CreateSectionCommand>,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if sections.is_empty() {
            return Err(ValidationError::EmptyField("sections"));
        }

        Ok(Self {
            name,
            language_tag,
            sections,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language_tag(&self) -> &LanguageTag {
        &self.language_tag
    }

    pub fn sections(&self) -> &[CreateSectionCommand] {
        &self.sections
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSectionCommand {
    name: String,
    exercises: Vec<CreateExerciseCommand>,
}

impl CreateSectionCommand {
    pub fn new(name: String, exercises: Vec<CreateExerciseCommand>) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if exercises.is_empty() {
            return Err(ValidationError::EmptyField("exercises"));
        }

        Ok(Self { name, exercises })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exercises(&self) -> &[CreateExerciseCommand] {
        &self.exercises
    }
}
