use crate::error::ServiceError;
use crate::models::{Category, NewCategory};
use crate::schema::{categories, comments, recipes};
use diesel::prelude::*;
use uuid::Uuid;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Trims and checks name/description. Blank descriptions normalize to None.
fn validate(input: &CategoryInput) -> Result<(String, Option<String>), ServiceError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "category name is required".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ServiceError::Validation(format!(
            "category name must be at most {MAX_NAME_LEN} characters"
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
                "category description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }
    }

    Ok((name.to_string(), description))
}

/// Surfaces the store's unique-name constraint as a conflict rather than a
/// generic database failure.
fn map_unique_name(error: diesel::result::Error) -> ServiceError {
    match error {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ) => ServiceError::Conflict("category name already exists".to_string()),
        other => other.into(),
    }
}

pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Category>, ServiceError> {
    Ok(categories::table
        .order(categories::created_at.asc())
        .select(Category::as_select())
        .load(conn)?)
}

pub fn get_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Category>, ServiceError> {
    Ok(categories::table
        .find(id)
        .select(Category::as_select())
        .first(conn)
        .optional()?)
}

pub fn create(conn: &mut PgConnection, input: CategoryInput) -> Result<Category, ServiceError> {
    let (name, description) = validate(&input)?;

    diesel::insert_into(categories::table)
        .values(&NewCategory {
            name: &name,
            description: description.as_deref(),
        })
        .returning(Category::as_returning())
        .get_result(conn)
        .map_err(map_unique_name)
}

/// Replaces name/description only; the recipe collection is untouched.
/// Returns None when the id doesn't resolve.
pub fn update(
    conn: &mut PgConnection,
    id: Uuid,
    input: CategoryInput,
) -> Result<Option<Category>, ServiceError> {
    let (name, description) = validate(&input)?;

    match diesel::update(categories::table.find(id))
        .set((
            categories::name.eq(&name),
            categories::description.eq(description.as_deref()),
            categories::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Category::as_returning())
        .get_result(conn)
    {
        Ok(category) => Ok(Some(category)),
        Err(diesel::NotFound) => Ok(None),
        Err(error) => Err(map_unique_name(error)),
    }
}

/// Deletes the category and everything it owns: the recipes' comments, then
/// the recipes, then the category itself, all in one transaction so a
/// failure partway through never leaves orphans. Deleting a missing id is a
/// no-op.
pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), ServiceError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let owned_recipes = recipes::table
            .filter(recipes::category_id.eq(id))
            .select(recipes::id);

        diesel::delete(comments::table.filter(comments::recipe_id.eq_any(owned_recipes)))
            .execute(conn)?;
        diesel::delete(recipes::table.filter(recipes::category_id.eq(id))).execute(conn)?;
        diesel::delete(categories::table.find(id)).execute(conn)?;

        Ok(())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, description: Option<&str>) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_trims_name_and_description() {
        let (name, description) = validate(&input("  Desserts  ", Some("  sweet things "))).unwrap();
        assert_eq!(name, "Desserts");
        assert_eq!(description.as_deref(), Some("sweet things"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(matches!(
            validate(&input("", None)),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            validate(&input("   \t ", None)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_enforces_name_length() {
        let at_limit = "x".repeat(MAX_NAME_LEN);
        assert!(validate(&input(&at_limit, None)).is_ok());

        let over_limit = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate(&input(&over_limit, None)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_enforces_description_length() {
        let over_limit = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            validate(&input("Soups", Some(&over_limit))),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_normalizes_blank_description_to_none() {
        let (_, description) = validate(&input("Soups", Some("   "))).unwrap();
        assert!(description.is_none());
    }
}
