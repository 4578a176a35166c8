use crate::api::ErrorResponse;
use crate::auth::{create_session, hash_password};
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub token: String,
}

fn validate(req: &SignupRequest) -> Result<(), ServiceError> {
    if req.username.trim().is_empty() {
        return Err(ServiceError::Validation(
            "username cannot be empty".to_string(),
        ));
    }
    if req.password.is_empty() {
        return Err(ServiceError::Validation(
            "password cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"username": "user", "password": "password"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate(&req)?;

    let mut conn = pool.get()?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))?;

    let new_user = NewUser {
        username: req.username.trim(),
        password_hash: &password_hash,
        role: "user",
    };

    let user: User = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => ServiceError::Conflict("username already exists".to_string()),
            other => ServiceError::Database(other),
        })?;

    let token = create_session(&mut conn, user.id)?;

    tracing::info!(user_id = %user.id, "created user account");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user.id,
            token,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_username() {
        let req = SignupRequest {
            username: "   ".to_string(),
            password: "secret".to_string(),
        };
        assert!(matches!(
            validate(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_password() {
        let req = SignupRequest {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(matches!(
            validate(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_accepts_credentials() {
        let req = SignupRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(validate(&req).is_ok());
    }
}
