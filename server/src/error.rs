//! Typed service errors and their single mapping to HTTP statuses.
//!
//! Services raise these; the `IntoResponse` impl at the bottom is the only
//! place error kinds are translated to transport statuses. Internal faults
//! are logged with full detail but clients only see a generic message.

use crate::api::ErrorResponse;
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed or incomplete input. The caller can fix and resubmit.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness violation, e.g. a duplicate category name.
    #[error("{0}")]
    Conflict(String),

    /// No caller identity for an operation that needs one.
    #[error("{0}")]
    AuthRequired(&'static str),

    /// Caller identity present but role insufficient.
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::AuthRequired(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Database(_) | ServiceError::Pool(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never leak internal diagnostics to the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed with internal error");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("recipe").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::AuthRequired("authentication required").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::Forbidden("insufficient role").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_names_the_entity() {
        assert_eq!(
            ServiceError::NotFound("category").to_string(),
            "category not found"
        );
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response = ServiceError::Internal("connection refused at 10.0.0.5".into());
        let response = response.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
