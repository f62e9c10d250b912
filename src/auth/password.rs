use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes `password` with a random salt. The result is self-describing
/// (`$2b$<cost>$<salt><digest>`), so verification needs nothing else.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// `Ok(true)` iff `password` matches `hashed_password`. A malformed hash is an error.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password, TEST_COST).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_hash_is_salted_and_self_describing() {
        let first = hash_password("p", TEST_COST).unwrap();
        let second = hash_password("p", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$2b$04$"));
        assert_ne!(first, "p");
    }

    #[test]
    fn test_distinct_short_passwords_do_not_match() {
        let hashed = hash_password("pw1", TEST_COST).unwrap();
        for candidate in ["pw2", "pw", "pw1 ", "PW1", ""] {
            assert!(
                !verify_password(candidate, &hashed).unwrap(),
                "{:?} should not verify",
                candidate
            );
        }
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("test_password123", "invalidhashformat") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            Ok(true) => panic!("Password verification should fail for invalid hash format"),
            Ok(false) => panic!("A malformed hash should be reported as an error"),
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }
}
