// src/models/user.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account created through the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    /// The identity framework uses the email address as the user name.
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Credentials handed to the identity provider.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// DTO for the registration endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Validation failures grouped by error code, in the shape of an RFC 7807
/// "validation problem" body. Codes keep the order they were first reported in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationProblem {
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationProblem {
    pub fn single(code: &str, description: impl Into<String>) -> Self {
        let mut problem = Self::default();
        problem.push(code, description);
        problem
    }

    /// Adds a description, appending to the existing list when the code repeats.
    pub fn push(&mut self, code: &str, description: impl Into<String>) {
        self.errors
            .entry(code.to_owned())
            .or_default()
            .push(description.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.errors.contains_key(code)
    }
}

impl std::fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<&str> = self.errors.keys().map(String::as_str).collect();
        write!(f, "validation failed: {}", codes.join(", "))
    }
}

impl std::error::Error for ValidationProblem {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_codes_are_grouped() {
        let mut problem = ValidationProblem::single("PasswordTooShort", "a");
        problem.push("PasswordTooShort", "b");
        problem.push("InvalidEmail", "c");

        assert_eq!(problem.errors["PasswordTooShort"], vec!["a", "b"]);
        assert_eq!(problem.errors.len(), 2);
        assert_eq!(
            problem.to_string(),
            "validation failed: PasswordTooShort, InvalidEmail"
        );
    }
}
