use super::CategoryResponse;
use crate::api::ErrorResponse;
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::policy::{self, Action};
use crate::services::{self, categories::CategoryInput};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body(content = CreateCategoryRequest, example = json!({"name": "Desserts", "description": "Sweet things"})),
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    MaybeUser(user): MaybeUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    policy::authorize(user.as_ref(), Action::WriteCategory)?;

    let mut conn = pool.get()?;
    let category = services::categories::create(
        &mut conn,
        CategoryInput {
            name: request.name,
            description: request.description,
        },
    )?;

    tracing::info!(category_id = %category.id, "created category");
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}
