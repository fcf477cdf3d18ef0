use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Manager,
    Admin,
    Superadmin,
}

impl Role {
    /// Roles allowed to create, edit and delete questions.
    pub fn is_content_editor(self) -> bool {
        matches!(self, Role::Manager | Role::Admin | Role::Superadmin)
    }

    /// Roles allowed into the user-management module. Managers are not.
    pub fn is_user_admin(self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }
}

/// An account. `username` and `password` are absent for accounts created
/// through Google sign-in; `google_id` is absent for local accounts until
/// the user links one.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    /// bcrypt hash, never the plaintext. Excluded from every response DTO.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new_local(username: &str, email: &str, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        User {
            id: None,
            username: Some(username.trim().to_string()),
            email: email.trim().to_lowercase(),
            password: Some(password_hash),
            google_id: None,
            profile_picture: None,
            role,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn from_google(
        google_id: String,
        email: &str,
        username: String,
        profile_picture: Option<String>,
    ) -> Self {
        let now = Utc::now();
        User {
            id: None,
            username: Some(username),
            email: email.trim().to_lowercase(),
            password: None,
            google_id: Some(google_id),
            profile_picture,
            role: Role::User,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|oid| oid.to_hex()).unwrap_or_default()
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str, email: &str) -> Self {
        User::new_local(username, email, "$2b$10$testhash".to_string(), Role::User)
    }

    pub fn test_user_with_role(username: &str, role: Role) -> Self {
        User::new_local(
            username,
            &format!("{}@example.com", username),
            "$2b$10$testhash".to_string(),
            role,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_user_normalizes_email() {
        let user = User::new_local("johndoe", "  John@Example.COM ", "hash".into(), Role::User);
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.username.as_deref(), Some("johndoe"));
        assert!(user.google_id.is_none());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_google_user_has_no_password() {
        let user = User::from_google(
            "g-123".to_string(),
            "jane@example.com",
            "jane".to_string(),
            Some("https://pic".to_string()),
        );
        assert!(user.password.is_none());
        assert_eq!(user.role, Role::User);
        assert_eq!(user.google_id.as_deref(), Some("g-123"));
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Manager.is_content_editor());
        assert!(!Role::Manager.is_user_admin());
        assert!(Role::Admin.is_user_admin());
        assert!(Role::Superadmin.is_user_admin());
        assert!(!Role::User.is_content_editor());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Superadmin).unwrap(),
            "\"superadmin\""
        );
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn test_password_hash_never_serializes_when_absent() {
        let user = User::from_google("g".into(), "a@b.com", "a".into(), None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
    }
}
