// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::ValidateEmail;

use crate::{
    error::AppError,
    models::user::{NewUser, RegisterRequest, ValidationProblem},
    services::identity::IdentityProvider,
};

/// Password used for accounts created by `create_test_user`.
const TEST_USER_PASSWORD: &str = "Test-User-1";

/// Registers a new user.
///
/// The email doubles as the user name. Validation failures from the identity
/// provider come back as a 400 validation problem grouped by error code.
/// Returns 200 with an empty body on success.
pub async fn register(
    State(identity): State<Arc<dyn IdentityProvider>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.is_empty() || !payload.email.validate_email() {
        return Err(ValidationProblem::single(
            "InvalidEmail",
            format!("Email '{}' is invalid.", payload.email),
        )
        .into());
    }

    let user = identity.create_user(payload.into()).await?;
    tracing::info!("Registered user {}", user.id);

    // Confirmation emails are not sent.
    Ok(StatusCode::OK)
}

/// Creates a throwaway account and reports its display name.
pub async fn create_test_user(
    State(identity): State<Arc<dyn IdentityProvider>>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = NewUser {
        email: format!("test-{}@example.com", uuid::Uuid::new_v4().simple()),
        password: TEST_USER_PASSWORD.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    };

    let user = identity.create_user(new_user).await?;

    Ok(format!("created user with name: {}", user.full_name()))
}
