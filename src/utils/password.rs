use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

use crate::error::{AppError, AppResult};

/// Hash a password using Argon2id with a random salt
///
/// # Returns
/// * `AppResult<String>` - The PHC string stored in `customer.password`
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes())
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to hash password: {}", e),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash
///
/// A stored value that is not a PHC string never matches.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password is not a valid hash");
            return Ok(false);
        }
    };

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("test_password_123"));
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("test_password_123").expect("Failed to hash password");

        assert!(verify_password("test_password_123", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("test_password_123").unwrap();
        let hash2 = hash_password("test_password_123").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("test_password_123", &hash1).unwrap());
        assert!(verify_password("test_password_123", &hash2).unwrap());
    }

    #[test]
    fn test_plain_text_stored_value_never_matches() {
        assert!(!verify_password("secret", "secret").unwrap());
    }
}
