use super::CommentResponse;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::services;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListCommentsResponse {
    pub comments: Vec<CommentResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/comments",
    tag = "comments",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Comments in creation order", body = ListCommentsResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_comments(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut conn = pool.get()?;
    let comments = services::comments::list_for_recipe(&mut conn, id)?
        .ok_or(ServiceError::NotFound("recipe"))?;

    Ok(Json(ListCommentsResponse {
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}
