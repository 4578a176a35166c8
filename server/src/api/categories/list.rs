use super::CategoryResponse;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::services;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "List of all categories", body = ListCategoriesResponse)
    )
)]
pub async fn list_categories(
    State(pool): State<Arc<DbPool>>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut conn = pool.get()?;
    let categories = services::categories::list_all(&mut conn)?;

    Ok(Json(ListCategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
