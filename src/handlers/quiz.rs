// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{
        question::PublicQuestion,
        quiz_session::{QuizResult, QuizSession},
    },
    services::quiz_source::QuizSource,
};

/// DTO for grading a full attempt.
#[derive(Debug, Deserialize)]
pub struct AttemptRequest {
    /// Chosen answer index per question, in question order.
    pub selections: Vec<usize>,
}

/// Returns the questions of a quiz without their correct answers.
pub async fn get_quiz(
    State(quizzes): State<Arc<dyn QuizSource>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let questions = quizzes.fetch_quiz(&id).await?;

    let public: Vec<PublicQuestion> = questions.iter().map(PublicQuestion::from).collect();

    Ok(Json(public))
}

/// Grades an attempt by replaying it through a fresh session.
///
/// * Each selection is selected, submitted and advanced in turn.
/// * Fewer selections than questions leave the result incomplete.
/// * Extra selections hit the finished session and are rejected with 409.
pub async fn submit_attempt(
    State(quizzes): State<Arc<dyn QuizSource>>,
    Path(id): Path<String>,
    Json(req): Json<AttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let questions = quizzes.fetch_quiz(&id).await?;

    let result = grade(QuizSession::new(questions), &req.selections)?;

    tracing::info!(
        "Graded attempt on quiz '{}': {}/{}",
        id,
        result.score.correct,
        result.score.total
    );

    Ok(Json(result))
}

fn grade(mut session: QuizSession, selections: &[usize]) -> Result<QuizResult, AppError> {
    for &answer in selections {
        session.select_answer(answer)?;
        session.submit_current_answer()?;
        session.advance()?;
    }
    Ok(session.result())
}
