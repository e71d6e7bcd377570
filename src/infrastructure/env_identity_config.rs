use crate::domain::{
    constants::{DEFAULT_PRIMARY_DOMAIN_NAME, PRIMARY_DOMAIN_NAME, TENANTS},
    error::ConfigError,
    services::identity_config::IdentityConfig,
};

/// Identity configuration taken from the process environment (and `.env`).
///
/// Every lookup goes back to the environment so operators can flip values
/// without a restart.
#[derive(Clone, Default)]
pub struct EnvIdentityConfig;

impl EnvIdentityConfig {
    pub fn new() -> Self {
        Self
    }

    /// Tenants listed under `TENANTS`; none when the key is unset.
    pub fn tenants(&self) -> Result<Vec<(i32, String)>, ConfigError> {
        self.property(TENANTS)
            .map_or_else(|| Ok(Vec::new()), |raw| parse_tenant_list(&raw))
    }
}

impl IdentityConfig for EnvIdentityConfig {
    fn property(&self, key: &str) -> Option<String> {
        dotenvy::var(key).ok()
    }

    fn primary_domain_name(&self) -> String {
        self.property(PRIMARY_DOMAIN_NAME)
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.to_uppercase())
            .unwrap_or_else(|| DEFAULT_PRIMARY_DOMAIN_NAME.to_string())
    }
}

/// Parse `42:acme.com,7:foo.org`. Blank entries are skipped.
pub fn parse_tenant_list(raw: &str) -> Result<Vec<(i32, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigError::InvalidTenantEntry(entry.to_string());
            let (id, domain) = entry.split_once(':').ok_or_else(invalid)?;
            let id = id.trim().parse::<i32>().map_err(|_| invalid())?;
            let domain = domain.trim();
            if domain.is_empty() {
                return Err(invalid());
            }
            Ok((id, domain.to_string()))
        })
        .collect()
}
