//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module has been reviewed for SQL injection safety:
//! - User input is ALWAYS passed via `.bind()` parameters
//! - No string concatenation or interpolation with user data

/// Filter expression matching a recipe whose JSONB ingredient array has any
/// entry that case-insensitively contains the bound pattern.
///
/// # Safety
/// The pattern is passed via `.bind()`, not interpolated.
///
/// # Why raw SQL?
/// Diesel has no DSL for `jsonb_array_elements_text`.
#[macro_export]
macro_rules! ingredient_matches {
    ($pattern:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>(
            "EXISTS (SELECT 1 FROM jsonb_array_elements_text(recipes.ingredients) AS entry \
             WHERE entry ILIKE ",
        )
        .bind::<diesel::sql_types::Text, _>($pattern)
        .sql(")")
    };
}
