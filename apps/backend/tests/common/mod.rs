//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up a test server with a database
//! - Helper functions for creating test data
//!
//! # Requirements
//! Tests that touch the database require PostgreSQL (set DATABASE_URL).
//! `TestContext::without_database` builds a server whose pool never connects,
//! for requests that are rejected before any query runs.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use language_quiz_backend::db::Database;
use language_quiz_backend::{router, AppState};

/// Test context containing database connection and router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context backed by a migrated database.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::from_database(db)
    }

    /// Create a test context whose pool is never used.
    pub fn without_database() -> Self {
        let db = Database::connect_lazy("postgres://localhost/language_quiz_unused")
            .expect("Failed to create lazy pool");
        Self::from_database(db)
    }

    fn from_database(db: Database) -> Self {
        let db = Arc::new(db);
        let app = router(AppState { db: db.clone() });
        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Remove a quiz created by a test; sections and exercises cascade.
    pub async fn cleanup_quiz(&self, quiz_id: &str) {
        let Ok(quiz_id) = Uuid::parse_str(quiz_id) else {
            return;
        };
        let _ = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(quiz_id)
            .execute(self.db.pool())
            .await;
    }
}
