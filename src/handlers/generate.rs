// src/handlers/generate.rs

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{config::Config, error::AppError, services::generator::TextGenerator};

/// Passes the configured story prompt to the text generator and relays its
/// raw answer, whatever the upstream status was.
pub async fn story(
    State(config): State<Config>,
    State(generator): State<Arc<dyn TextGenerator>>,
) -> Result<impl IntoResponse, AppError> {
    let body = generator.generate(&config.story_prompt).await?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
