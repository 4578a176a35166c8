pub mod create;
pub mod list;

use crate::services::comments::CommentDetail;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    /// Username of the authenticated caller who wrote the comment
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentDetail> for CommentResponse {
    fn from(detail: CommentDetail) -> Self {
        CommentResponse {
            id: detail.comment.id,
            text: detail.comment.text,
            author: detail.author,
            created_at: detail.comment.created_at,
        }
    }
}
