//! Client for the quiz-generation backend.

mod client;

pub use client::{ApiError, ExportedQuiz, GenerateResponse, QuizApi, QuizBackend};
