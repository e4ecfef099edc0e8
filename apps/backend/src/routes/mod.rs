//! HTTP route handlers

pub mod quizzes;
