use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use model::entities::user::UserError;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, warn};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::schemas::ErrorResponse;

/// Field name to the list of messages reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors returned by handlers and repository functions.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// The row does not exist or is not visible to the caller
    #[error("{0}")]
    NotFound(String),

    /// One or more fields failed validation
    #[error("Invalid input")]
    Validation(FieldErrors),

    /// The request body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    /// The request body exceeds the configured limit
    #[error("Request body is too large.")]
    PayloadTooLarge(FieldErrors),

    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Validation failure on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        ApiError::Validation(fields)
    }

    pub fn not_found() -> Self {
        ApiError::NotFound("No item matches the given query.".to_string())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "NOT_AUTHENTICATED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ApiError::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", code, self);
        }

        // Internal details stay in the logs
        let message = match &self {
            ApiError::Database(_) | ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let fields = match self {
            ApiError::Validation(fields) | ApiError::PayloadTooLarge(fields) => Some(fields),
            _ => None,
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            success: false,
            fields,
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        collect_validation_errors("", &errors, &mut fields);
        ApiError::Validation(fields)
    }
}

/// Flatten nested validation errors into dotted field paths (`abilities[0].name`).
fn collect_validation_errors(prefix: &str, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = out.entry(path).or_default();
                for e in field_errors {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({}).", e.code));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_validation_errors(&path, inner, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::not_found()
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(FieldErrors::new())
        } else {
            ApiError::BadRequest(error.body_text())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(error: std::io::Error) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::MissingEmail => ApiError::field("email", error.to_string()),
            UserError::PasswordHash(message) => ApiError::Internal(message),
            UserError::Database(db_error) => ApiError::Database(db_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 5, message = "Ensure this field has at least 5 characters."))]
        password: String,
    }

    #[test]
    fn test_validation_errors_are_keyed_by_field() {
        let errors = Sample {
            password: "qw".to_string(),
        }
        .validate()
        .unwrap_err();

        match ApiError::from(errors) {
            ApiError::Validation(fields) => {
                assert_eq!(
                    fields.get("password"),
                    Some(&vec!["Ensure this field has at least 5 characters.".to_string()])
                );
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::not_found().status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_and_code().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::field("name", "bad").status_and_code(),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        );
        assert_eq!(
            ApiError::PayloadTooLarge(FieldErrors::new()).status_and_code().0,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::MethodNotAllowed("POST".into()).status_and_code().0,
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
