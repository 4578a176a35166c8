use crate::api::recipes::list::ListRecipesResponse;
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
    path = "/api/categories/{id}/recipes",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Recipes belonging to the category", body = ListRecipesResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn category_recipes(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut conn = pool.get()?;
    let recipes = services::recipes::list_by_category(&mut conn, id)?
        .ok_or(ServiceError::NotFound("category"))?;

    Ok(Json(ListRecipesResponse {
        recipes: recipes.into_iter().map(Into::into).collect(),
    }))
}
