use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Reset codes are valid for this long.
pub const OTP_TTL_MINUTES: i64 = 10;

/// A one-time password issued for a password reset. Only the sha256 of the
/// 6-digit code is stored; the raw code exists in the reset email and
/// nowhere else.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PasswordResetOtp {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub otp_hash: String,
    pub expires_at: DateTime,
    pub created_at: DateTime,
}

impl PasswordResetOtp {
    pub fn new(email: &str, code: &str) -> Self {
        let now = DateTime::now();
        let expires_at = DateTime::from_millis(now.timestamp_millis() + OTP_TTL_MINUTES * 60 * 1000);
        PasswordResetOtp {
            id: None,
            email: email.trim().to_lowercase(),
            otp_hash: hash_code(code),
            expires_at,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        DateTime::now() > self.expires_at
    }
}

pub fn hash_code(code: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(code.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generates a random code in 100000..=999999.
pub fn generate_code() -> String {
    use rand::Rng;
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_hash_code_consistency() {
        assert_eq!(hash_code("123456"), hash_code("123456"));
        assert_eq!(hash_code(" 123456 "), hash_code("123456"));
        assert_ne!(hash_code("123456"), hash_code("654321"));
        assert_eq!(hash_code("123456").len(), 64);
    }

    #[test]
    fn test_fresh_otp_is_not_expired() {
        let otp = PasswordResetOtp::new("user@example.com", "123456");
        assert!(!otp.is_expired());
        assert_eq!(otp.email, "user@example.com");
        assert_ne!(otp.otp_hash, "123456");
    }

    #[test]
    fn test_expired_otp() {
        let mut otp = PasswordResetOtp::new("user@example.com", "123456");
        otp.expires_at = DateTime::from_millis(DateTime::now().timestamp_millis() - 1000);
        assert!(otp.is_expired());
    }

    #[test]
    fn test_email_is_normalized() {
        let otp = PasswordResetOtp::new(" User@Example.COM ", "123456");
        assert_eq!(otp.email, "user@example.com");
    }
}
