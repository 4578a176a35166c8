use super::CategoryResponse;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::services;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut conn = pool.get()?;
    let category = services::categories::get_by_id(&mut conn, id)?
        .ok_or(ServiceError::NotFound("category"))?;

    Ok(Json(CategoryResponse::from(category)))
}
