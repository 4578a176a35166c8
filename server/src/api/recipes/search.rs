use super::list::ListRecipesResponse;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::services::{self, recipes::SearchKind};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchRecipesParams {
    /// Case-insensitive substring match against recipe titles
    pub title: Option<String>,
    /// Case-insensitive substring match against any ingredient entry
    pub ingredient: Option<String>,
    /// Case-insensitive substring match against title or description
    pub query: Option<String>,
}

/// Exactly one search dimension per request; a blank term would match
/// everything and is rejected.
fn resolve(params: SearchRecipesParams) -> Result<SearchKind, ServiceError> {
    let kind = match (params.title, params.ingredient, params.query) {
        (Some(term), None, None) => SearchKind::Title(term),
        (None, Some(term), None) => SearchKind::Ingredient(term),
        (None, None, Some(term)) => SearchKind::Text(term),
        _ => {
            return Err(ServiceError::Validation(
                "provide exactly one of title, ingredient or query".to_string(),
            ))
        }
    };

    let term = match &kind {
        SearchKind::Title(t) | SearchKind::Ingredient(t) | SearchKind::Text(t) => t,
    };
    if term.trim().is_empty() {
        return Err(ServiceError::Validation(
            "search term cannot be empty".to_string(),
        ));
    }

    Ok(kind)
}

#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    params(SearchRecipesParams),
    responses(
        (status = 200, description = "Matching recipes (empty list when none)", body = ListRecipesResponse),
        (status = 400, description = "Invalid search parameters", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<SearchRecipesParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = resolve(params)?;

    let mut conn = pool.get()?;
    let recipes = services::recipes::search(&mut conn, &kind)?;

    Ok(Json(ListRecipesResponse {
        recipes: recipes.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        title: Option<&str>,
        ingredient: Option<&str>,
        query: Option<&str>,
    ) -> SearchRecipesParams {
        SearchRecipesParams {
            title: title.map(str::to_string),
            ingredient: ingredient.map(str::to_string),
            query: query.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_single_dimension() {
        assert!(matches!(
            resolve(params(Some("cake"), None, None)),
            Ok(SearchKind::Title(_))
        ));
        assert!(matches!(
            resolve(params(None, Some("potato"), None)),
            Ok(SearchKind::Ingredient(_))
        ));
        assert!(matches!(
            resolve(params(None, None, Some("soup"))),
            Ok(SearchKind::Text(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_no_dimension() {
        assert!(matches!(
            resolve(params(None, None, None)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_multiple_dimensions() {
        assert!(matches!(
            resolve(params(Some("cake"), Some("flour"), None)),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            resolve(params(Some("cake"), Some("flour"), Some("x"))),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_blank_term() {
        assert!(matches!(
            resolve(params(Some("   "), None, None)),
            Err(ServiceError::Validation(_))
        ));
    }
}
