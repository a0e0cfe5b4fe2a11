// src/services/quiz_source.rs

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::question::{QuestionSet, sample_questions},
};

/// Identifier of the built-in sample quiz.
pub const SAMPLE_QUIZ_ID: &str = "capitals";

/// Where question sets come from.
#[async_trait]
pub trait QuizSource: Send + Sync {
    async fn fetch_quiz(&self, id: &str) -> Result<QuestionSet, AppError>;
}

/// Named question sets held in memory.
#[derive(Debug, Clone)]
pub struct CatalogQuizSource {
    quizzes: HashMap<String, QuestionSet>,
}

impl Default for CatalogQuizSource {
    fn default() -> Self {
        let mut quizzes = HashMap::new();
        quizzes.insert(SAMPLE_QUIZ_ID.to_string(), sample_questions());
        Self { quizzes }
    }
}

impl CatalogQuizSource {
    pub fn empty() -> Self {
        Self {
            quizzes: HashMap::new(),
        }
    }

    /// Parses a `{ "<id>": [question, ...] }` catalog.
    ///
    /// Every question must be well formed; the first bad one aborts loading.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let quizzes: HashMap<String, QuestionSet> = serde_json::from_str(raw)?;

        for (id, questions) in &quizzes {
            for (index, question) in questions.iter().enumerate() {
                question.check().map_err(|reason| {
                    AppError::BadRequest(format!("quiz '{}' question {}: {}", id, index, reason))
                })?;
            }
        }

        Ok(Self { quizzes })
    }

    /// Adds or replaces a quiz.
    pub fn insert(&mut self, id: impl Into<String>, questions: QuestionSet) {
        self.quizzes.insert(id.into(), questions);
    }

    pub fn merge(&mut self, other: CatalogQuizSource) {
        self.quizzes.extend(other.quizzes);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.quizzes.keys().map(String::as_str)
    }
}

#[async_trait]
impl QuizSource for CatalogQuizSource {
    async fn fetch_quiz(&self, id: &str) -> Result<QuestionSet, AppError> {
        self.quizzes
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Quiz '{}' not found", id)))
    }
}
