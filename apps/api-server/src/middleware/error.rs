//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use agora_core::{DomainError, RepoError};
use agora_shared::ErrorResponse;
use std::fmt;

/// Realm announced in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "agora";

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound { entity: &'static str, id: i64 },
    BadRequest(String),
    Validation(String),
    Unauthorized(String),
    Conflict {
        entity: Option<&'static str>,
        message: String,
    },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound { entity, id } => write!(f, "{} with id {} not found", entity, id),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Conflict { message, .. } => write!(f, "Conflict: {}", message),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Build the problem body, optionally tagged with the request id.
    pub fn problem(&self, request_id: Option<&str>) -> ErrorResponse {
        let error = match self {
            AppError::NotFound { entity, id } => {
                ErrorResponse::not_found(self.to_string()).with_record(*entity, *id)
            }
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(detail) => {
                ErrorResponse::new(400, "Validation Failed").with_detail(detail)
            }
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Conflict { entity, message } => {
                let error = ErrorResponse::conflict(message);
                match entity {
                    Some(entity) => error.with_entity(*entity),
                    None => error,
                }
            }
            AppError::Internal(_) => ErrorResponse::internal_error(),
        };

        match request_id {
            Some(id) => error.with_request_id(id),
            None => error,
        }
    }

    /// Render the full HTTP response, headers included.
    pub fn respond(&self, request_id: Option<&str>) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if matches!(self, AppError::Unauthorized(_)) {
            response.insert_header((
                header::WWW_AUTHENTICATE,
                format!("Basic realm=\"{}\"", AUTH_REALM),
            ));
        }
        response.json(self.problem(request_id))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }
        self.respond(None)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, id } => AppError::NotFound { entity, id },
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Duplicate { entity, message } => AppError::Conflict {
                entity: Some(entity),
                message,
            },
            DomainError::Unauthorized(err) => AppError::Unauthorized(err.to_string()),
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => AppError::Conflict {
                entity: None,
                message: msg,
            },
            RepoError::NotFound => AppError::Internal("Unattributed missing record".to_string()),
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

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
                format!("{}: {}", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        AppError::Validation(fields.join("; "))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::ports::AuthError;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("User", 7), StatusCode::NOT_FOUND),
            (
                DomainError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Duplicate {
                    entity: "Like",
                    message: "exists".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Repository(RepoError::Constraint("fk".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Repository(RepoError::Query("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::from(AuthError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_not_found_body_names_the_record() {
        let body = AppError::NotFound {
            entity: "User",
            id: 7,
        }
        .problem(Some("req-1"));

        assert_eq!(body.status, 404);
        assert_eq!(body.detail.as_deref(), Some("User with id 7 not found"));
        assert_eq!(body.entity.as_deref(), Some("User"));
        assert_eq!(body.id, Some(7));
        assert_eq!(body.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_auth_failure_keeps_its_reason() {
        let err = AppError::from(DomainError::from(AuthError::MissingAuth));
        let body = err.problem(None);

        assert_eq!(body.status, 401);
        assert_eq!(body.detail.as_deref(), Some("Missing authorization header"));
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let body = AppError::Internal("connection refused".to_string()).problem(None);
        assert!(body.detail.is_none());
    }
}
