use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    generator::{GeminiClient, TextGenerator},
    identity::{IdentityProvider, InMemoryIdentityProvider},
    quiz_source::{CatalogQuizSource, QuizSource},
};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub quizzes: Arc<dyn QuizSource>,
    pub identity: Arc<dyn IdentityProvider>,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    /// In-memory collaborators and the real Gemini client.
    pub fn new(config: Config, quizzes: CatalogQuizSource) -> Self {
        let generator = GeminiClient::from_config(&config);
        Self {
            config,
            quizzes: Arc::new(quizzes),
            identity: Arc::new(InMemoryIdentityProvider::default()),
            generator: Arc::new(generator),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn QuizSource> {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}

impl FromRef<AppState> for Arc<dyn IdentityProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TextGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
