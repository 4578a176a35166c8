use super::CommentResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::policy::{self, Action};
use crate::services;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddCommentRequest {
    pub text: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/comments",
    tag = "comments",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body(content = AddCommentRequest, example = json!({"text": "Delicious!"})),
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_comment(
    // The extractor rejects anonymous callers before validation runs.
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    policy::authorize(Some(&user), Action::AddComment)?;

    let mut conn = pool.get()?;
    let comment = services::comments::add(&mut conn, id, &user, &request.text)?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}
