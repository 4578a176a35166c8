use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"username": "user", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut conn = pool.get()?;

    // Usernames are matched case-insensitively; a missing user and a bad
    // password both report the same error.
    let user: User = users::table
        .filter(
            diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(username) = LOWER(")
                .bind::<diesel::sql_types::Text, _>(&req.username)
                .sql(")"),
        )
        .select(User::as_select())
        .first(&mut conn)
        .map_err(|_| ServiceError::AuthRequired("invalid credentials"))?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ServiceError::AuthRequired("invalid credentials"));
    }

    let token = create_session(&mut conn, user.id)?;

    Ok(Json(LoginResponse { token }))
}
