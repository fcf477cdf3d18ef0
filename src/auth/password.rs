use crate::errors::AppResult;

/// Matches the work factor the existing user records were hashed with.
const HASH_COST: u32 = 10;

pub fn hash_password(plaintext: &str) -> AppResult<String> {
    Ok(bcrypt::hash(plaintext, HASH_COST)?)
}

pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

/// Pre-bcrypt records stored the password verbatim. Anything without the
/// `$2` modular-crypt prefix gets compared directly and rehashed on the
/// next successful login.
pub fn is_legacy_plaintext(stored: &str) -> bool {
    !stored.starts_with("$2")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("hunter2secret").unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("hunter2secret", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_tolerates_garbage_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_legacy_plaintext_detection() {
        assert!(is_legacy_plaintext("plaintext-password"));
        assert!(!is_legacy_plaintext("$2b$10$abcdefghijklmnopqrstuv"));
    }
}
