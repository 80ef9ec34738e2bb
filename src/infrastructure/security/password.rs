use crate::domain::errors::DomainError;

pub fn hash_password(plain: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(plain, cost)
        .map_err(|e| DomainError::InfrastructureError(format!("Password hashing failed: {}", e)))
}

/// A malformed stored hash counts as a mismatch rather than an error.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}
