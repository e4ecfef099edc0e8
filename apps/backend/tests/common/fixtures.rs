//! Test fixtures and factory functions for creating request bodies.

#![allow(dead_code)]

use serde_json::{json, Value};
use uuid::Uuid;

/// Multiple choice exercise from the "pick the animal" scenario.
pub fn multiple_choice_exercise() -> Value {
    json!({
        "type": "multipleChoice",
        "question": "Pick the animal",
        "choices": ["Cat", "Dog", "Fish", "Bird"],
        "answer": "Dog"
    })
}

/// Fill in the blank exercise with feedback.
pub fn fill_in_the_blank_exercise() -> Value {
    json!({
        "type": "fillInTheBlank",
        "question": "This is a ______ truck.",
        "answer": "fire",
        "feedback": "A fire truck puts out fires."
    })
}

pub fn sentence_correction_exercise() -> Value {
    json!({
        "type": "sentenceCorrection",
        "sentence": "She go home.",
        "correctedSentence": "She goes home."
    })
}

/// Create a section request body.
pub fn section(name: &str, exercises: Vec<Value>) -> Value {
    json!({ "name": name, "exercises": exercises })
}

/// Create a quiz request body.
pub fn create_quiz_request(name: &str, language_tag: &str, sections: Vec<Value>) -> Value {
    json!({
        "name": name,
        "languageTag": language_tag,
        "sections": sections
    })
}

/// Quiz with two sections covering all three exercise types.
pub fn sample_quiz_request() -> Value {
    create_quiz_request(
        &unique_quiz_name("basics"),
        "en-US",
        vec![
            section(
                "Vocabulary",
                vec![multiple_choice_exercise(), fill_in_the_blank_exercise()],
            ),
            section("Grammar", vec![sentence_correction_exercise()]),
        ],
    )
}

/// Create a submit answers request body.
pub fn submit_answers_request(answers: Vec<Value>) -> Value {
    json!({ "userAnswers": answers })
}

/// Generate a unique quiz name to avoid collisions.
pub fn unique_quiz_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
