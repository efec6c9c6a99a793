//! Registration policy for usernames and passwords.

use jobhub_core::config::AuthConfig;
use jobhub_core::error::AppError;

/// Validates new credentials against configured length rules.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    password_min_length: usize,
    /// Minimum username length.
    username_min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            password_min_length: config.password_min_length,
            username_min_length: config.username_min_length,
        }
    }

    /// Validates a username.
    pub fn validate_username(&self, username: &str) -> Result<(), AppError> {
        if username.chars().count() < self.username_min_length {
            return Err(AppError::validation(format!(
                "Username must be at least {} characters long",
                self.username_min_length
            )));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(AppError::validation("Username must not contain whitespace"));
        }
        Ok(())
    }

    /// Validates a password.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.password_min_length
            )));
        }
        Ok(())
    }
}
