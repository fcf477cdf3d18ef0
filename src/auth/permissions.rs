use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Question bank writes: manager, admin and superadmin.
pub fn require_content_editor(claims: &Claims) -> AppResult<()> {
    if !claims.role.is_content_editor() {
        return Err(AppError::Forbidden(
            "Access denied. Content editing requires manager, admin or superadmin role."
                .to_string(),
        ));
    }
    Ok(())
}

/// The user-management module: admin and superadmin only, managers are
/// deliberately excluded.
pub fn require_user_admin(claims: &Claims) -> AppResult<()> {
    if !claims.role.is_user_admin() {
        return Err(AppError::Forbidden(
            "Access denied. User management is only available for admin and superadmin roles."
                .to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::user::Role;

    fn create_test_claims(sub: &str, role: Role) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: format!("{}@example.com", sub),
            role,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_content_editor_allows_manager_and_up() {
        assert!(require_content_editor(&create_test_claims("m", Role::Manager)).is_ok());
        assert!(require_content_editor(&create_test_claims("a", Role::Admin)).is_ok());
        assert!(require_content_editor(&create_test_claims("s", Role::Superadmin)).is_ok());
    }

    #[test]
    fn test_content_editor_denies_plain_user() {
        let result = require_content_editor(&create_test_claims("u", Role::User));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_user_admin_denies_manager() {
        let result = require_user_admin(&create_test_claims("m", Role::Manager));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(require_user_admin(&create_test_claims("a", Role::Admin)).is_ok());
    }

    #[test]
    fn test_user_admin_allows_superadmin() {
        assert!(require_user_admin(&create_test_claims("s", Role::Superadmin)).is_ok());
    }
}
