// src/handlers/home.rs

/// Liveness greeting.
pub async fn hello() -> &'static str {
    "hello world!"
}
