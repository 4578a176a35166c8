use crate::error::ServiceError;
use crate::models::{Comment, NewComment, User};
use crate::schema::{comments, recipes, users};
use diesel::prelude::*;
use uuid::Uuid;

/// A comment row joined with its author's username. The author always comes
/// from the authenticated caller, never from the request body.
#[derive(Debug, Clone)]
pub struct CommentDetail {
    pub comment: Comment,
    pub author: String,
}

fn recipe_exists(conn: &mut PgConnection, recipe_id: Uuid) -> Result<bool, ServiceError> {
    Ok(diesel::select(diesel::dsl::exists(recipes::table.find(recipe_id))).get_result(conn)?)
}

pub fn add(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    author: &User,
    text: &str,
) -> Result<CommentDetail, ServiceError> {
    if !recipe_exists(conn, recipe_id)? {
        return Err(ServiceError::NotFound("recipe"));
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::Validation(
            "comment text is required".to_string(),
        ));
    }

    let comment: Comment = diesel::insert_into(comments::table)
        .values(&NewComment {
            recipe_id,
            author_id: author.id,
            text,
        })
        .returning(Comment::as_returning())
        .get_result(conn)?;

    Ok(CommentDetail {
        comment,
        author: author.username.clone(),
    })
}

/// Comments for a recipe in creation order. Returns None when the recipe
/// itself doesn't exist, consistent with [`add`].
pub fn list_for_recipe(
    conn: &mut PgConnection,
    recipe_id: Uuid,
) -> Result<Option<Vec<CommentDetail>>, ServiceError> {
    if !recipe_exists(conn, recipe_id)? {
        return Ok(None);
    }

    let rows: Vec<(Comment, String)> = comments::table
        .inner_join(users::table)
        .filter(comments::recipe_id.eq(recipe_id))
        .order(comments::created_at.asc())
        .select((Comment::as_select(), users::username))
        .load(conn)?;

    Ok(Some(
        rows.into_iter()
            .map(|(comment, author)| CommentDetail { comment, author })
            .collect(),
    ))
}
