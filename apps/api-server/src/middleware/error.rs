//! Error handling - RFC 7807 compliant responses.
//!
//! The taxonomy mirrors the service layer: missing ids are a clean 404,
//! ownership mismatches are 403 with the human-readable reason, and bad
//! form input is 422 with per-field messages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use forum_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    Conflict(String),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_detail(errors.join(", "))
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<forum_core::error::DomainError> for AppError {
    fn from(err: forum_core::error::DomainError) -> Self {
        use forum_core::error::DomainError;
        match err {
            DomainError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity, id))
            }
            DomainError::Forbidden(msg) => AppError::Forbidden(msg.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<forum_core::error::RepoError> for AppError {
    fn from(err: forum_core::error::RepoError) -> Self {
        use forum_core::error::RepoError;
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::error::DomainError;

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        let not_found: AppError = DomainError::not_found("post", uuid::Uuid::new_v4()).into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let forbidden: AppError =
            DomainError::Forbidden("You can't edit a post you don't own.").into();
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_errors_are_unprocessable_entity() {
        let err = AppError::Validation(vec!["subject: must not be empty".to_string()]);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
