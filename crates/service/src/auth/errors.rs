use thiserror::Error;

/// Business errors for auth workflows. All terminal and non-retryable.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user account is not active")]
    UserNotActive,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid token")]
    InvalidToken,
    #[error("email already exists")]
    EmailExists,
    #[error("user not found")]
    UserNotFound,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable code for external mapping/logging
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UserNotActive => "USER_NOT_ACTIVE",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::EmailExists => "EMAIL_EXISTS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Hash(_) | AuthError::Token(_) | AuthError::Repository(_) => "INTERNAL_ERROR",
        }
    }
}
