use super::RecipeResponse;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::services;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "List of all recipes", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(
    State(pool): State<Arc<DbPool>>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut conn = pool.get()?;
    let recipes = services::recipes::list_all(&mut conn)?;

    Ok(Json(ListRecipesResponse {
        recipes: recipes.into_iter().map(Into::into).collect(),
    }))
}
