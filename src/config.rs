// src/config.rs

use std::env;
use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default prompt for the story passthrough endpoint.
pub const STORY_PROMPT: &str = "Write a story about a magic backpack.";

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    pub quiz_catalog_path: Option<String>,
    pub story_prompt: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let gemini_model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let gemini_base_url = Url::parse(&gemini_base_url)
            .expect("GEMINI_BASE_URL must be a valid URL");

        let quiz_catalog_path = env::var("QUIZ_CATALOG_PATH").ok();

        let story_prompt = env::var("STORY_PROMPT")
            .unwrap_or_else(|_| STORY_PROMPT.to_string());

        Self {
            rust_log,
            port,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            quiz_catalog_path,
            story_prompt,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: "info".to_string(),
            port: 3000,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: Url::parse(DEFAULT_GEMINI_BASE_URL)
                .expect("default Gemini URL is valid"),
            quiz_catalog_path: None,
            story_prompt: STORY_PROMPT.to_string(),
        }
    }
}
