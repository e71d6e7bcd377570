use std::sync::Arc;

use crate::domain::{
    error::DomainError,
    models::{
        caller::{CallerContext, RequestContext},
        registration::SelfRegistrationRequest,
    },
    services::identity_config::IdentityConfig,
};

/// Turns transport-level request context into domain inputs.
pub struct ContextResolver<C: IdentityConfig> {
    config: Arc<C>,
}

impl<C: IdentityConfig> ContextResolver<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }

    pub fn resolve_caller(&self, context: &RequestContext) -> Result<CallerContext, DomainError> {
        let username = context
            .authenticated_user
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(DomainError::Unauthenticated)?;

        Ok(CallerContext::new(
            username,
            &self.config.primary_domain_name(),
            context.tenant_id,
        ))
    }

    /// Apply tenant and realm defaults before the request reaches the registration manager.
    pub fn normalize(
        &self,
        mut request: SelfRegistrationRequest,
        tenant_name_from_context: Option<&str>,
    ) -> SelfRegistrationRequest {
        // the tenant resolved by the server wins over whatever the client sent
        if let Some(tenant) = tenant_name_from_context.filter(|t| !t.trim().is_empty()) {
            request.user.tenant_domain = Some(tenant.to_string());
        }

        let realm_is_blank = request
            .user
            .realm
            .as_deref()
            .is_none_or(|realm| realm.trim().is_empty());
        if realm_is_blank {
            request.user.realm = Some(self.config.primary_domain_name());
        }

        request
    }
}
