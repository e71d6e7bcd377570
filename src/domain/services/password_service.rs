use crate::domain::{error::RecoveryError, models::credential::HashedPassword};

/// Service for hashing passwords before they are stored
pub trait PasswordHasher: Clone + Send + Sync {
    /// Hash a plain text password
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, RecoveryError>;
}
