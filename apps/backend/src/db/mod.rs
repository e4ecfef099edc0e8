//! PostgreSQL database operations

use std::collections::HashMap;

use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

const EXERCISE_COLUMNS: &str = r#"
    id, quiz_section_id, position, exercise_type, feedback, question, choices,
    answer, sentence, corrected_sentence, created_at, updated_at
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that only connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Quiz Repository ===

    /// Get a quiz with all of its sections and exercises
    pub async fn get_quiz(&self, quiz_id: Uuid) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, DbQuiz>(
            r#"
            SELECT id, name, language_tag, created_at, updated_at
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        match quiz {
            Some(quiz) => Ok(self.build_quizzes(vec![quiz]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List all quizzes, newest first
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        let rows = sqlx::query_as::<_, DbQuiz>(
            r#"
            SELECT id, name, language_tag, created_at, updated_at
            FROM quizzes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.build_quizzes(rows).await
    }

    /// Insert a quiz, its sections and its exercises in one transaction
    pub async fn create_quiz(&self, cmd: &CreateQuizCommand) -> Result<Quiz> {
        let mut tx = self.pool.begin().await?;

        let quiz = sqlx::query_as::<_, DbQuiz>(
            r#"
            INSERT INTO quizzes (id, name, language_tag)
            VALUES ($1, $2, $3)
            RETURNING id, name, language_tag, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(cmd.name())
        .bind(cmd.language_tag().as_str())
        .fetch_one(&mut *tx)
        .await?;

        let mut sections = Vec::with_capacity(cmd.sections().len());
        for (position, section_cmd) in cmd.sections().iter().enumerate() {
            let section = sqlx::query_as::<_, DbQuizSection>(
                r#"
                INSERT INTO quiz_sections (id, quiz_id, position, name)
                VALUES ($1, $2, $3, $4)
                RETURNING id, quiz_id, position, name, created_at, updated_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(quiz.id)
            .bind(position as i32)
            .bind(section_cmd.name())
            .fetch_one(&mut *tx)
            .await?;

            let mut exercises = Vec::with_capacity(section_cmd.exercises().len());
            for (position, exercise_cmd) in section_cmd.exercises().iter().enumerate() {
                let row = insert_exercise(&mut tx, section.id, position as i32, exercise_cmd).await?;
                exercises.push(row.to_exercise()?);
            }

            sections.push(Section::new(section.name, exercises));
        }

        tx.commit().await?;

        tracing::info!(quiz_id = %quiz.id, name = %quiz.name, "created quiz");
        quiz.to_quiz(sections)
    }

    /// Load sections and exercises for all quizzes with one query each,
    /// keeping the order of `quizzes`
    async fn build_quizzes(&self, quizzes: Vec<DbQuiz>) -> Result<Vec<Quiz>> {
        if quizzes.is_empty() {
            return Ok(Vec::new());
        }

        let quiz_ids: Vec<Uuid> = quizzes.iter().map(|q| q.id).collect();
        let sections = sqlx::query_as::<_, DbQuizSection>(
            r#"
            SELECT id, quiz_id, position, name, created_at, updated_at
            FROM quiz_sections
            WHERE quiz_id = ANY($1)
            ORDER BY quiz_id, position
            "#,
        )
        .bind(quiz_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let section_ids: Vec<Uuid> = sections.iter().map(|s| s.id).collect();
        let exercise_rows = sqlx::query_as::<_, DbExercise>(&format!(
            r#"
            SELECT {EXERCISE_COLUMNS}
            FROM exercises
            WHERE quiz_section_id = ANY($1)
            ORDER BY quiz_section_id, position
            "#
        ))
        .bind(section_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut exercises_by_section: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
        for row in exercise_rows {
            exercises_by_section
                .entry(row.quiz_section_id)
                .or_default()
                .push(row.to_exercise()?);
        }

        let mut sections_by_quiz: HashMap<Uuid, Vec<Section>> = HashMap::new();
        for s in sections {
            let exercises = exercises_by_section.remove(&s.id).unwrap_or_default();
            sections_by_quiz
                .entry(s.quiz_id)
                .or_default()
                .push(Section::new(s.name, exercises));
        }

        quizzes
            .into_iter()
            .map(|quiz| {
                let sections = sections_by_quiz.remove(&quiz.id).unwrap_or_default();
                quiz.to_quiz(sections)
            })
            .collect()
    }
}

async fn insert_exercise(
    tx: &mut Transaction<'_, Postgres>,
    section_id: Uuid,
    position: i32,
    cmd: &CreateExerciseCommand,
) -> Result<DbExercise> {
    let (question, choices, answer, sentence, corrected_sentence) = match cmd {
        CreateExerciseCommand::MultipleChoice(c) => (
            Some(c.question()),
            Some(c.choices()),
            Some(c.answer()),
            None,
            None,
        ),
        CreateExerciseCommand::FillInTheBlank(c) => {
            (Some(c.question()), None, Some(c.answer()), None, None)
        }
        CreateExerciseCommand::SentenceCorrection(c) => (
            None,
            None,
            None,
            Some(c.sentence()),
            Some(c.corrected_sentence()),
        ),
    };

    let row = sqlx::query_as::<_, DbExercise>(&format!(
        r#"
        INSERT INTO exercises (id, quiz_section_id, position, exercise_type, feedback,
                               question, choices, answer, sentence, corrected_sentence)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {EXERCISE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(section_id)
    .bind(position)
    .bind(cmd.exercise_type().as_str())
    .bind(cmd.feedback())
    .bind(question)
    .bind(choices)
    .bind(answer)
    .bind(sentence)
    .bind(corrected_sentence)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row)
}
