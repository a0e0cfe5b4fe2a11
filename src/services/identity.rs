// src/services/identity.rs

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::{NewUser, User, ValidationProblem};

/// Account creation as offered by an identity framework.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, ValidationProblem>;
}

/// Password rules. The defaults match the identity framework's defaults.
#[derive(Debug, Clone)]
pub struct PasswordOptions {
    pub required_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            required_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordOptions {
    /// Collects every rule the password breaks, not just the first one.
    pub fn check(&self, password: &str, problem: &mut ValidationProblem) {
        if password.chars().count() < self.required_length {
            problem.push(
                "PasswordTooShort",
                format!("Passwords must be at least {} characters.", self.required_length),
            );
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_ascii_alphanumeric()) {
            problem.push(
                "PasswordRequiresNonAlphanumeric",
                "Passwords must have at least one non alphanumeric character.",
            );
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            problem.push(
                "PasswordRequiresDigit",
                "Passwords must have at least one digit ('0'-'9').",
            );
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            problem.push(
                "PasswordRequiresLower",
                "Passwords must have at least one lowercase ('a'-'z').",
            );
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            problem.push(
                "PasswordRequiresUpper",
                "Passwords must have at least one uppercase ('A'-'Z').",
            );
        }
    }
}

/// Keeps accounts in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    password_options: PasswordOptions,
    // Keyed by normalized (upper-cased) user name.
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryIdentityProvider {
    pub fn new(password_options: PasswordOptions) -> Self {
        Self {
            password_options,
            users: RwLock::default(),
        }
    }
}

#[cfg(test)]
impl InMemoryIdentityProvider {
    async fn find_by_name(&self, user_name: &str) -> Option<User> {
        self.users.read().await.get(&normalize(user_name)).cloned()
    }

    /// Unknown users never match.
    async fn check_password(&self, user_name: &str, password: &str) -> bool {
        match self.find_by_name(user_name).await {
            Some(user) => verify_password(password, &user.password_hash),
            None => false,
        }
    }

    async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    /// The user is validated before the password, like the identity framework.
    /// The lock is held from the duplicate check until the insert.
    async fn create_user(&self, new_user: NewUser) -> Result<User, ValidationProblem> {
        let key = normalize(&new_user.email);
        let mut users = self.users.write().await;
        if users.contains_key(&key) {
            return Err(ValidationProblem::single(
                "DuplicateUserName",
                format!("Username '{}' is already taken.", new_user.email),
            ));
        }

        let mut problem = ValidationProblem::default();
        self.password_options.check(&new_user.password, &mut problem);
        if !problem.is_empty() {
            return Err(problem);
        }

        let password_hash = hash_password(&new_user.password).map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            ValidationProblem::single("DefaultError", "An unknown failure has occurred.")
        })?;

        let user = User {
            id: Uuid::new_v4(),
            user_name: new_user.email.clone(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash,
            created_at: chrono::Utc::now(),
        };
        users.insert(key, user.clone());

        tracing::info!("Created user {}", user.id);
        Ok(user)
    }
}

fn normalize(user_name: &str) -> String {
    user_name.trim().to_uppercase()
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

#[cfg(test)]
fn verify_password(password: &str, password_hash: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
