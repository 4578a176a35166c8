use super::RecipeResponse;
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
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut conn = pool.get()?;
    let recipe =
        services::recipes::get_by_id(&mut conn, id)?.ok_or(ServiceError::NotFound("recipe"))?;

    Ok(Json(RecipeResponse::from(recipe)))
}
