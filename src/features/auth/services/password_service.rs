use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::core::error::{AppError, Result};

/// Argon2id password hashing plus the minimum-length policy.
pub struct PasswordService {
    argon2: Argon2<'static>,
    min_length: usize,
}

impl PasswordService {
    pub fn new(min_length: usize) -> Self {
        Self {
            argon2: Argon2::default(),
            min_length,
        }
    }

    /// Reject passwords shorter than the configured minimum
    pub fn check_strength(&self, password: &str) -> Result<()> {
        if password.chars().count() < self.min_length {
            return Err(AppError::Conflict(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }

    /// Check strength, then hash into a PHC string
    pub fn hash(&self, password: &str) -> Result<String> {
        self.check_strength(password)?;

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash is malformed: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let passwords = PasswordService::new(6);
        let hash = passwords.hash("officer123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(passwords.verify("officer123", &hash).unwrap());
        assert!(!passwords.verify("officer124", &hash).unwrap());
    }

    #[test]
    fn test_weak_password_rejected() {
        let passwords = PasswordService::new(6);
        assert!(matches!(
            passwords.hash("12345").unwrap_err(),
            AppError::Conflict(_)
        ));
        assert!(passwords.check_strength("123456").is_ok());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let passwords = PasswordService::new(6);
        assert!(matches!(
            passwords.verify("secret", "plaintext").unwrap_err(),
            AppError::Internal(_)
        ));
    }
}
