use bcrypt::{hash, verify};
use tracing::error;

use crate::error::{ApiError, Result};

/// Salted bcrypt hashing with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, self.cost).map_err(|e| {
            error!("Password hashing failed: {}", e);
            ApiError::Internal("Password hashing failed".to_string())
        })
    }

    /// `Ok(false)` on mismatch. A malformed stored hash is an internal error.
    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        verify(password, password_hash).map_err(|e| {
            error!("Password verification failed: {}", e);
            ApiError::Internal("Password verification failed".to_string())
        })
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::new(4);
        let hashed = service.hash_password("s3cret pass ").unwrap();

        assert_ne!(hashed, "s3cret pass ");
        assert!(service.verify_password("s3cret pass ", &hashed).unwrap());
        assert!(!service.verify_password("s3cret pass", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = PasswordService::new(4);
        let a = service.hash_password("same").unwrap();
        let b = service.hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let service = PasswordService::new(4);
        let err = service.verify_password("x", "not-a-bcrypt-hash").unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
