// src/main.rs

use dotenvy::dotenv;
use quiz_api::config::Config;
use quiz_api::error::AppError;
use quiz_api::routes;
use quiz_api::services::quiz_source::CatalogQuizSource;
use quiz_api::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let quizzes = match load_catalog(&config).await {
        Ok(quizzes) => quizzes,
        Err(e) => {
            tracing::error!("Failed to load quiz catalog: {}", e);
            std::process::exit(1);
        }
    };

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set, story generation is disabled");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    // Create AppState
    let state = AppState::new(config, quizzes);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}

/// Sample quiz plus whatever the optional catalog file defines.
async fn load_catalog(config: &Config) -> Result<CatalogQuizSource, AppError> {
    let mut quizzes = CatalogQuizSource::default();

    if let Some(path) = &config.quiz_catalog_path {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::InternalServerError(format!("{}: {}", path, e)))?;
        let catalog = CatalogQuizSource::from_json(&raw)?;
        tracing::info!("Loaded quiz catalog from {}", path);
        quizzes.merge(catalog);
    }

    Ok(quizzes)
}
