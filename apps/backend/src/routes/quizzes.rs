//! Quiz endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn parse_quiz_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest(format!("invalid quiz id: {}", id)))
}

/// GET /api/quizzes
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<QuizResponse>>> {
    let quizzes = state.db.list_quizzes().await?;
    Ok(Json(quizzes.iter().map(QuizResponse::from).collect()))
}

/// GET /api/quizzes/:id
pub async fn get(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
) -> Result<Json<QuizResponse>> {
    let quiz_id = parse_quiz_id(&quiz_id)?;
    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quiz {}", quiz_id)))?;

    Ok(Json(QuizResponse::from(&quiz)))
}

/// POST /api/quizzes
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateQuizRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<QuizResponse>)> {
    let Json(request) = payload?;
    let command = request.into_command()?;

    let quiz = state.db.create_quiz(&command).await?;

    Ok((StatusCode::CREATED, Json(QuizResponse::from(&quiz))))
}

/// POST /api/quizzes/:id/answers
pub async fn submit_answers(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
    payload: std::result::Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<Json<SubmitAnswersResponse>> {
    let Json(request) = payload?;
    let user_answers = request
        .user_answers
        .ok_or_else(|| ApiError::BadRequest("field 'userAnswers' is missing".to_string()))?;

    let quiz_id = parse_quiz_id(&quiz_id)?;
    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quiz {}", quiz_id)))?;

    let exercise_count = quiz.exercise_count();
    if user_answers.len() > exercise_count {
        return Err(ApiError::BadRequest(format!(
            "expected at most {} answers, found: {}",
            exercise_count,
            user_answers.len()
        )));
    }

    let results = quiz.grade(&user_answers);
    tracing::debug!(
        quiz_id = %quiz_id,
        correct = results.iter().filter(|r| r.correct).count(),
        total = results.len(),
        "graded answers"
    );

    Ok(Json(SubmitAnswersResponse { results }))
}
