//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::error::AuthError;

/// Hash a password with Argon2id (OWASP parameters: m=19456 KiB, t=2,
/// p=1) and a per-call random salt. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let params = Params::new(19456, 2, 1, None)
        .map_err(|e| AuthError::Crypto(format!("invalid argon2 params: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Crypto(format!("password hashing error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch. Hashing
/// parameters are read from the stored hash itself.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Crypto(format!("invalid password hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!(
            "password verification error: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_produces_argon2id_phc_string() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn verify_correct_password() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
    }

    #[test]
    fn verify_wrong_password() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn verify_malformed_hash_errors() {
        let result = verify_password("hunter2", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
