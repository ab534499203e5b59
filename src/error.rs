//! Error types for Blogpad

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("User {0} is already registered.")]
    DuplicateUsername(String),

    #[error("Incorrect username.")]
    UserNotFound(String),

    #[error("Incorrect password.")]
    InvalidCredentials,

    #[error("Post id {0} doesn't exist.")]
    PostNotFound(i64),

    #[error("You are not the author of this post.")]
    Forbidden,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Config file not found. Run 'blogpad init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error is something the user can fix by resubmitting a form
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::DuplicateUsername(_)
                | Error::UserNotFound(_)
                | Error::InvalidCredentials
        )
    }

    /// HTTP status used when the error escapes a handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::DuplicateUsername(_) => StatusCode::BAD_REQUEST,
            Error::UserNotFound(_) | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::PostNotFound(_) => StatusCode::NOT_FOUND,
            Error::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            return (status, "Internal Server Error").into_response();
        }
        (status, self.to_string()).into_response()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_are_user_facing() {
        assert!(Error::Validation("Username is required.".to_string()).is_user_facing());
        assert!(Error::DuplicateUsername("alice".to_string()).is_user_facing());
        assert!(Error::UserNotFound("bob".to_string()).is_user_facing());
        assert!(Error::InvalidCredentials.is_user_facing());
        assert!(!Error::Forbidden.is_user_facing());
        assert!(!Error::PostNotFound(1).is_user_facing());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::PostNotFound(3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::Other("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::DuplicateUsername("alice".to_string()).to_string(),
            "User alice is already registered."
        );
        assert_eq!(Error::PostNotFound(9).to_string(), "Post id 9 doesn't exist.");
    }
}
