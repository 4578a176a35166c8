use crate::api::ErrorResponse;
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::error::ServiceError;
use crate::policy::{self, Action};
use crate::services;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category and its recipes deleted (no-op when absent)"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    MaybeUser(user): MaybeUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    policy::authorize(user.as_ref(), Action::DeleteCategory)?;

    let mut conn = pool.get()?;
    services::categories::delete(&mut conn, id)?;

    tracing::info!(category_id = %id, "deleted category and its recipes");
    Ok(StatusCode::NO_CONTENT)
}
