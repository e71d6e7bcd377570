use async_trait::async_trait;

use crate::domain::{
    error::RecoveryError,
    models::registration::{Claim, NotificationResult, Property, User},
};

/// Provisions self-registered users and dispatches their confirmation codes.
#[async_trait]
pub trait UserSelfRegistrationManager {
    /// Returns `Ok(None)` when the manager has nothing to report back.
    async fn register_user(
        &self,
        user: User,
        password: String,
        claims: Vec<Claim>,
        properties: Vec<Property>,
    ) -> Result<Option<NotificationResult>, RecoveryError>;
}
