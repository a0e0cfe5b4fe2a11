// src/services/generator.rs

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::{config::Config, error::AppError};

/// A third-party text generation API.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` upstream and returns the raw response body.
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Client for Gemini's `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: Url, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model: model.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        )
    }

    /// `{base}/v1beta/models/{model}:generateContent` without the key.
    ///
    /// Any path on the base URL (e.g. a proxy prefix) is kept.
    pub fn endpoint(&self) -> Result<Url, AppError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| AppError::InternalServerError(e.to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::ServiceUnavailable("GEMINI_API_KEY is not configured".to_string())
        })?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint()?)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!("Gemini API returned {}", status);
        }

        Ok(text)
    }
}
