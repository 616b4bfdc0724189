use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Database Error: {0}")]
    DatabaseError(#[from] DbError),

    #[error("Blocking Error: {0}")]
    BlockingError(String),

    #[error("Hashing Error: {0}")]
    HashingError(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Composition Error: {0}")]
    CompositionEmpty(String),

    #[error("Authentication Error: {0}")]
    AuthenticationError(#[from] AuthError),
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection Error: {0}")]
    ConnectionError(String),

    #[error("Query Error: {0}")]
    QueryBuilderError(String),

    #[error("Insertion Error: {0}")]
    InsertionError(String),

    #[error("Updation Error: {0}")]
    UpdationError(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Other Database Error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing token: {0}")]
    MissingToken(String),

    #[error("JWT Authentication Error: {0}")]
    JwtAuthenticationError(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Other Authentication Error: {0}")]
    OtherAuthenticationError(String),
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CustomError::NotFound(_) | CustomError::CompositionEmpty(_) => StatusCode::NOT_FOUND,
            CustomError::Conflict(_) => StatusCode::CONFLICT,
            CustomError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            CustomError::DatabaseError(DbError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            CustomError::DatabaseError(_)
            | CustomError::BlockingError(_)
            | CustomError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
