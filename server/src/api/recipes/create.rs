use super::RecipeResponse;
use crate::api::ErrorResponse;
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::policy::{self, Action};
use crate::services::{self, recipes::RecipeInput};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Must reference an existing category. Optional in the schema so a
    /// missing value maps to a validation error rather than a parse error.
    pub category_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body(content = CreateRecipeRequest, example = json!({
        "title": "Cake",
        "ingredients": ["flour", "sugar"],
        "category_id": "00000000-0000-0000-0000-000000000000"
    })),
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Referenced category does not exist", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    MaybeUser(user): MaybeUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    policy::authorize(user.as_ref(), Action::CreateRecipe)?;
    let author = user.ok_or(ServiceError::AuthRequired("authentication required"))?;

    let mut conn = pool.get()?;
    let recipe = services::recipes::create(
        &mut conn,
        author.id,
        RecipeInput {
            title: request.title,
            description: request.description,
            ingredients: request.ingredients,
            category_id: request.category_id,
        },
    )?;

    tracing::info!(recipe_id = %recipe.recipe.id, "created recipe");
    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}
