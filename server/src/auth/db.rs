use crate::db::DbPool;
use crate::error::ServiceError;
use crate::models::{NewSession, NewUser, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;

use super::crypto::{generate_token, hash_password, hash_token};

const SESSION_LIFETIME_DAYS: i64 = 30;

pub fn create_session(
    conn: &mut PgConnection,
    user_id: uuid::Uuid,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + Duration::days(SESSION_LIFETIME_DAYS);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

pub fn get_user_from_token(pool: &DbPool, token: &str) -> Option<User> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(User::as_select())
        .first(&mut conn)
        .ok()
}

/// Seeds the admin account from the environment on startup. Updating the
/// role of an existing row is deliberate: promoting a user to admin only
/// requires restarting with ADMIN_USERNAME pointed at them.
pub fn ensure_admin_account(
    conn: &mut PgConnection,
    username: &str,
    password: &str,
) -> Result<(), ServiceError> {
    let password_hash = hash_password(password)
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))?;

    let new_user = NewUser {
        username,
        password_hash: &password_hash,
        role: "admin",
    };

    diesel::insert_into(users::table)
        .values(&new_user)
        .on_conflict(users::username)
        .do_update()
        .set(users::role.eq("admin"))
        .execute(conn)?;

    Ok(())
}
