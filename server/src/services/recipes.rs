use crate::error::ServiceError;
use crate::ingredient_matches;
use crate::models::{Category, NewRecipe, Recipe};
use crate::schema::{categories, comments, recipes, users};
use diesel::prelude::*;
use uuid::Uuid;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// A recipe row joined with its category and author username, the shape
/// every read operation returns.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub category: Category,
    pub author: String,
}

#[derive(Debug, Clone)]
pub struct RecipeInput {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub category_id: Option<Uuid>,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub enum SearchKind {
    /// Case-insensitive substring match against the title.
    Title(String),
    /// Case-insensitive substring match against any ingredient entry.
    Ingredient(String),
    /// Case-insensitive substring match against title or description.
    Text(String),
}

#[derive(Debug)]
struct ValidatedRecipe {
    title: String,
    description: Option<String>,
    ingredients: Vec<String>,
    category_id: Uuid,
}

/// Checks fields in the contract's order: title, category presence,
/// ingredients, lengths. Category *existence* is checked against the store
/// by the caller, after this passes.
fn validate(input: &RecipeInput) -> Result<ValidatedRecipe, ServiceError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ServiceError::Validation(
            "recipe title is required".to_string(),
        ));
    }

    let category_id = input.category_id.ok_or_else(|| {
        ServiceError::Validation("recipe category is required".to_string())
    })?;

    if input.ingredients.is_empty() {
        return Err(ServiceError::Validation(
            "recipe must have at least one ingredient".to_string(),
        ));
    }
    let mut ingredients = Vec::with_capacity(input.ingredients.len());
    for entry in &input.ingredients {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(ServiceError::Validation(
                "ingredient entries cannot be blank".to_string(),
            ));
        }
        ingredients.push(entry.to_string());
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ServiceError::Validation(format!(
            "recipe title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    let description = input
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    if let Some(ref description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ServiceError::Validation(format!(
                "recipe description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }
    }

    Ok(ValidatedRecipe {
        title: title.to_string(),
        description,
        ingredients,
        category_id,
    })
}

/// Escapes LIKE metacharacters and wraps the term for substring matching.
pub(crate) fn like_pattern(term: &str) -> String {
    format!(
        "%{}%",
        term.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

fn resolve_category(conn: &mut PgConnection, id: Uuid) -> Result<(), ServiceError> {
    let exists: bool =
        diesel::select(diesel::dsl::exists(categories::table.find(id))).get_result(conn)?;
    if exists {
        Ok(())
    } else {
        Err(ServiceError::NotFound("category"))
    }
}

fn ingredients_json(ingredients: &[String]) -> Result<serde_json::Value, ServiceError> {
    serde_json::to_value(ingredients)
        .map_err(|e| ServiceError::Internal(format!("ingredient serialization failed: {e}")))
}

fn load_detail(conn: &mut PgConnection, id: Uuid) -> Result<Option<RecipeDetail>, ServiceError> {
    let row: Option<(Recipe, Category, String)> = recipes::table
        .inner_join(categories::table)
        .inner_join(users::table)
        .filter(recipes::id.eq(id))
        .select((Recipe::as_select(), Category::as_select(), users::username))
        .first(conn)
        .optional()?;

    Ok(row.map(|(recipe, category, author)| RecipeDetail {
        recipe,
        category,
        author,
    }))
}

pub fn list_all(conn: &mut PgConnection) -> Result<Vec<RecipeDetail>, ServiceError> {
    let rows: Vec<(Recipe, Category, String)> = recipes::table
        .inner_join(categories::table)
        .inner_join(users::table)
        .order(recipes::created_at.asc())
        .select((Recipe::as_select(), Category::as_select(), users::username))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(recipe, category, author)| RecipeDetail {
            recipe,
            category,
            author,
        })
        .collect())
}

pub fn get_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<RecipeDetail>, ServiceError> {
    load_detail(conn, id)
}

/// The category's recipe collection. Returns None when the category itself
/// doesn't exist, so callers can distinguish "empty" from "missing".
pub fn list_by_category(
    conn: &mut PgConnection,
    category_id: Uuid,
) -> Result<Option<Vec<RecipeDetail>>, ServiceError> {
    if resolve_category(conn, category_id).is_err() {
        return Ok(None);
    }

    let rows: Vec<(Recipe, Category, String)> = recipes::table
        .inner_join(categories::table)
        .inner_join(users::table)
        .filter(recipes::category_id.eq(category_id))
        .order(recipes::created_at.asc())
        .select((Recipe::as_select(), Category::as_select(), users::username))
        .load(conn)?;

    Ok(Some(
        rows.into_iter()
            .map(|(recipe, category, author)| RecipeDetail {
                recipe,
                category,
                author,
            })
            .collect(),
    ))
}

pub fn create(
    conn: &mut PgConnection,
    author_id: Uuid,
    input: RecipeInput,
) -> Result<RecipeDetail, ServiceError> {
    let validated = validate(&input)?;
    resolve_category(conn, validated.category_id)?;

    let recipe: Recipe = diesel::insert_into(recipes::table)
        .values(&NewRecipe {
            category_id: validated.category_id,
            author_id,
            title: &validated.title,
            description: validated.description.as_deref(),
            ingredients: ingredients_json(&validated.ingredients)?,
        })
        .returning(Recipe::as_returning())
        .get_result(conn)?;

    load_detail(conn, recipe.id)?.ok_or(ServiceError::NotFound("recipe"))
}

/// Merge-then-revalidate update. Changing the category re-points the
/// foreign key in the same statement as the field update, so the recipe is
/// never observable outside exactly one category.
pub fn update(
    conn: &mut PgConnection,
    id: Uuid,
    changes: RecipeChanges,
) -> Result<Option<RecipeDetail>, ServiceError> {
    let Some(current) = recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first::<Recipe>(conn)
        .optional()?
    else {
        return Ok(None);
    };

    let current_ingredients: Vec<String> =
        serde_json::from_value(current.ingredients.clone()).unwrap_or_default();

    let merged = RecipeInput {
        title: changes.title.unwrap_or(current.title),
        description: changes.description.or(current.description),
        ingredients: changes.ingredients.unwrap_or(current_ingredients),
        category_id: Some(changes.category_id.unwrap_or(current.category_id)),
    };

    let validated = validate(&merged)?;
    resolve_category(conn, validated.category_id)?;

    diesel::update(recipes::table.find(id))
        .set((
            recipes::title.eq(&validated.title),
            recipes::description.eq(validated.description.as_deref()),
            recipes::ingredients.eq(ingredients_json(&validated.ingredients)?),
            recipes::category_id.eq(validated.category_id),
            recipes::updated_at.eq(diesel::dsl::now),
        ))
        .execute(conn)?;

    load_detail(conn, id)
}

/// Deletes the recipe and its comments in one transaction. Idempotent.
pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), ServiceError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(comments::table.filter(comments::recipe_id.eq(id))).execute(conn)?;
        diesel::delete(recipes::table.find(id)).execute(conn)?;
        Ok(())
    })?;

    Ok(())
}

pub fn search(
    conn: &mut PgConnection,
    kind: &SearchKind,
) -> Result<Vec<RecipeDetail>, ServiceError> {
    let mut query = recipes::table
        .inner_join(categories::table)
        .inner_join(users::table)
        .order(recipes::created_at.asc())
        .into_boxed();

    query = match kind {
        SearchKind::Title(term) => query.filter(recipes::title.ilike(like_pattern(term))),
        SearchKind::Text(term) => {
            let pattern = like_pattern(term);
            query.filter(
                recipes::title
                    .ilike(pattern.clone())
                    .or(recipes::description.ilike(pattern)),
            )
        }
        SearchKind::Ingredient(term) => query.filter(ingredient_matches!(like_pattern(term))),
    };

    let rows: Vec<(Recipe, Category, String)> = query
        .select((Recipe::as_select(), Category::as_select(), users::username))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(recipe, category, author)| RecipeDetail {
            recipe,
            category,
            author,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        title: &str,
        ingredients: &[&str],
        category_id: Option<Uuid>,
    ) -> RecipeInput {
        RecipeInput {
            title: title.to_string(),
            description: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            category_id,
        }
    }

    #[test]
    fn test_validate_trims_fields() {
        let validated = validate(&RecipeInput {
            title: "  Borscht  ".to_string(),
            description: Some("  hearty beet soup  ".to_string()),
            ingredients: vec![" beetroot ".to_string(), "cabbage".to_string()],
            category_id: Some(Uuid::new_v4()),
        })
        .unwrap();
        assert_eq!(validated.title, "Borscht");
        assert_eq!(validated.description.as_deref(), Some("hearty beet soup"));
        assert_eq!(validated.ingredients, vec!["beetroot", "cabbage"]);
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let err = validate(&input("  ", &["salt"], Some(Uuid::new_v4()))).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("title")));
    }

    #[test]
    fn test_validate_rejects_missing_category() {
        let err = validate(&input("Cake", &["flour"], None)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("category")));
    }

    #[test]
    fn test_validate_rejects_empty_ingredients() {
        let err = validate(&input("Cake", &[], Some(Uuid::new_v4()))).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("ingredient")));
    }

    #[test]
    fn test_validate_rejects_blank_ingredient_entry() {
        let err = validate(&input("Cake", &["flour", "  "], Some(Uuid::new_v4()))).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("blank")));
    }

    #[test]
    fn test_validate_checks_title_before_category() {
        // Both title and category are missing; the title error wins.
        let err = validate(&input("", &["salt"], None)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("title")));
    }

    #[test]
    fn test_validate_enforces_title_length() {
        let over_limit = "x".repeat(MAX_TITLE_LEN + 1);
        let err = validate(&input(&over_limit, &["salt"], Some(Uuid::new_v4()))).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("cake"), "%cake%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
