//! Role-based access policy.
//!
//! One explicit table maps each mutating action to the minimum role that may
//! perform it. Handlers call [`authorize`] before touching the service
//! layer; reads are open to anonymous callers and never go through here.

use crate::error::ServiceError;
use crate::models::User;

/// Role hierarchy, lowest to highest. Ordering is significant: a caller may
/// perform an action iff their role is >= the action's minimum role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Anonymous,
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Parses the role column of a user row. Unknown values fall back to
    /// `Anonymous` so a corrupted row never grants mutations.
    pub fn parse(value: &str) -> Role {
        match value {
            "user" => Role::User,
            "moderator" => Role::Moderator,
            "admin" => Role::Admin,
            _ => Role::Anonymous,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Action {
    CreateRecipe,
    UpdateRecipe,
    DeleteRecipe,
    WriteCategory,
    DeleteCategory,
    AddComment,
}

pub fn required_role(action: Action) -> Role {
    match action {
        Action::CreateRecipe => Role::User,
        Action::UpdateRecipe => Role::Moderator,
        Action::DeleteRecipe => Role::Admin,
        Action::WriteCategory => Role::Moderator,
        Action::DeleteCategory => Role::Admin,
        Action::AddComment => Role::User,
    }
}

/// Allows or denies `action` for the caller. An absent identity yields an
/// authentication-required error; a present identity with an insufficient
/// role yields a forbidden error. The two map to different statuses.
pub fn authorize(caller: Option<&User>, action: Action) -> Result<(), ServiceError> {
    let role = caller
        .map(|user| Role::parse(&user.role))
        .unwrap_or(Role::Anonymous);

    if role >= required_role(action) {
        Ok(())
    } else if caller.is_none() {
        Err(ServiceError::AuthRequired("authentication required"))
    } else {
        Err(ServiceError::Forbidden("insufficient role"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user_with_role(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Anonymous < Role::User);
        assert!(Role::User < Role::Moderator);
        assert!(Role::Moderator < Role::Admin);
    }

    #[test]
    fn test_parse_unknown_role_is_anonymous() {
        assert_eq!(Role::parse("superuser"), Role::Anonymous);
        assert_eq!(Role::parse(""), Role::Anonymous);
    }

    #[test]
    fn test_anonymous_caller_gets_auth_required() {
        let err = authorize(None, Action::CreateRecipe).unwrap_err();
        assert!(matches!(err, ServiceError::AuthRequired(_)));
    }

    #[test]
    fn test_user_can_create_but_not_update_or_delete_recipes() {
        let user = user_with_role("user");
        assert!(authorize(Some(&user), Action::CreateRecipe).is_ok());
        assert!(matches!(
            authorize(Some(&user), Action::UpdateRecipe),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            authorize(Some(&user), Action::DeleteRecipe),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn test_moderator_can_update_but_not_delete_recipes() {
        let moderator = user_with_role("moderator");
        assert!(authorize(Some(&moderator), Action::UpdateRecipe).is_ok());
        assert!(authorize(Some(&moderator), Action::WriteCategory).is_ok());
        assert!(matches!(
            authorize(Some(&moderator), Action::DeleteRecipe),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            authorize(Some(&moderator), Action::DeleteCategory),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_can_do_everything() {
        let admin = user_with_role("admin");
        for action in [
            Action::CreateRecipe,
            Action::UpdateRecipe,
            Action::DeleteRecipe,
            Action::WriteCategory,
            Action::DeleteCategory,
            Action::AddComment,
        ] {
            assert!(authorize(Some(&admin), action).is_ok());
        }
    }

    #[test]
    fn test_any_authenticated_user_can_comment() {
        let user = user_with_role("user");
        assert!(authorize(Some(&user), Action::AddComment).is_ok());
        assert!(matches!(
            authorize(None, Action::AddComment),
            Err(ServiceError::AuthRequired(_))
        ));
    }

    #[test]
    fn test_unknown_role_is_denied_mutations() {
        let weird = user_with_role("owner");
        assert!(matches!(
            authorize(Some(&weird), Action::CreateRecipe),
            Err(ServiceError::Forbidden(_))
        ));
    }
}
