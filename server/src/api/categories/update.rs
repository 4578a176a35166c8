use super::CategoryResponse;
use crate::api::ErrorResponse;
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::policy::{self, Action};
use crate::services::{self, categories::CategoryInput};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    MaybeUser(user): MaybeUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    policy::authorize(user.as_ref(), Action::WriteCategory)?;

    let mut conn = pool.get()?;
    let category = services::categories::update(
        &mut conn,
        id,
        CategoryInput {
            name: request.name,
            description: request.description,
        },
    )?
    .ok_or(ServiceError::NotFound("category"))?;

    Ok(Json(CategoryResponse::from(category)))
}
