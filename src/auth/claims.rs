use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::user::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub email: String,
    pub role: Role,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        // Use MongoDB ObjectId hex string as subject when available, fallback to email
        let subject = user
            .id
            .as_ref()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| user.email.clone());

        Self {
            sub: subject,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user = User::test_user("johndoe", "john@example.com");
        let claims = Claims::new(&user, 24);

        // Without an ObjectId the subject falls back to email
        assert_eq!(claims.sub, "john@example.com");
        assert_eq!(claims.email, "john@example.com");
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_claims_use_object_id_when_present() {
        let mut user = User::test_user_with_role("boss", Role::Admin);
        let oid = mongodb::bson::oid::ObjectId::new();
        user.id = Some(oid);

        let claims = Claims::new(&user, 1);
        assert_eq!(claims.sub, oid.to_hex());
        assert_eq!(claims.role, Role::Admin);
    }
}
