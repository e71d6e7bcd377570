use async_trait::async_trait;

use crate::domain::{error::UserExportError, models::user_attributes::UserAttributes};

/// Source of the attributes a user is allowed to see about themself.
#[async_trait]
pub trait UserInformationService {
    /// `username` must not carry a user-store-domain prefix.
    async fn get_retained_user_information(
        &self,
        username: &str,
        user_store_domain: &str,
        tenant_id: i32,
    ) -> Result<UserAttributes, UserExportError>;
}
