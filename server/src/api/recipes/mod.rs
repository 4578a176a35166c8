pub mod comments;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod update;

use crate::services::recipes::RecipeDetail;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/search", get(search::search_recipes))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/{id}/comments",
            get(comments::list::list_comments).post(comments::create::add_comment),
        )
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub category: CategoryRef,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeDetail> for RecipeResponse {
    fn from(detail: RecipeDetail) -> Self {
        let ingredients: Vec<String> =
            serde_json::from_value(detail.recipe.ingredients).unwrap_or_default();

        RecipeResponse {
            id: detail.recipe.id,
            title: detail.recipe.title,
            description: detail.recipe.description,
            ingredients,
            category: CategoryRef {
                id: detail.category.id,
                name: detail.category.name,
            },
            author: detail.author,
            created_at: detail.recipe.created_at,
            updated_at: detail.recipe.updated_at,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
        search::search_recipes,
        comments::create::add_comment,
        comments::list::list_comments,
    ),
    components(schemas(
        RecipeResponse,
        CategoryRef,
        list::ListRecipesResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        comments::CommentResponse,
        comments::create::AddCommentRequest,
        comments::list::ListCommentsResponse,
    ))
)]
pub struct ApiDoc;
