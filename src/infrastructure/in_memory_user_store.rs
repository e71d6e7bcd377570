use std::{
    collections::{BTreeMap, HashMap, hash_map::Entry},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    constants::{ERROR_CODE_USER_ALREADY_EXISTS, SUPER_TENANT_DOMAIN, SUPER_TENANT_ID},
    error::{RecoveryError, UserExportError},
    models::{
        credential::HashedPassword,
        registration::{Claim, NotificationResult, Property, User},
        user_attributes::UserAttributes,
    },
    services::{
        password_service::PasswordHasher, user_information_service::UserInformationService,
        user_self_registration_manager::UserSelfRegistrationManager,
    },
};

const ERROR_CODE_INVALID_TENANT: &str = "20015";
const ERROR_CODE_INVALID_USERNAME: &str = "20027";
const ERROR_CODE_WEAK_PASSWORD: &str = "20040";
const SUCCESS_CODE_USER_CREATED: &str = "USR-02001";
const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct UserKey {
    tenant_domain: String,
    user_store_domain: String,
    username: String,
}

#[derive(Debug, Clone)]
struct StoredUser {
    #[expect(dead_code, reason = "the hash is stored but never read back")]
    password_hash: HashedPassword,
    claims: BTreeMap<String, String>,
    created_at: DateTime<Utc>,
}

/// Process-local user directory standing in for the recovery engine and the
/// user-information service. Users are lost on restart.
#[derive(Clone)]
pub struct InMemoryUserStore<P: PasswordHasher> {
    password_hasher: P,
    notification_channel: String,
    tenants: Arc<HashMap<i32, String>>,
    users: Arc<RwLock<HashMap<UserKey, StoredUser>>>,
}

impl<P: PasswordHasher> InMemoryUserStore<P> {
    /// Store that only knows the super tenant.
    pub fn new(password_hasher: P, notification_channel: impl Into<String>) -> Self {
        let mut tenants = HashMap::new();
        tenants.insert(SUPER_TENANT_ID, SUPER_TENANT_DOMAIN.to_string());
        Self {
            password_hasher,
            notification_channel: notification_channel.into(),
            tenants: Arc::new(tenants),
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_tenant(mut self, tenant_id: i32, tenant_domain: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.tenants).insert(tenant_id, tenant_domain.into());
        self
    }

    fn is_known_tenant(&self, tenant_domain: &str) -> bool {
        self.tenants.values().any(|domain| domain == tenant_domain)
    }
}

fn user_already_exists(username: &str) -> RecoveryError {
    RecoveryError::client(
        ERROR_CODE_USER_ALREADY_EXISTS,
        format!("User {username} already exists in the system. Please use a different username."),
    )
}

#[async_trait]
impl<P: PasswordHasher + 'static> UserSelfRegistrationManager for InMemoryUserStore<P> {
    async fn register_user(
        &self,
        user: User,
        password: String,
        claims: Vec<Claim>,
        _properties: Vec<Property>,
    ) -> Result<Option<NotificationResult>, RecoveryError> {
        if user.username.trim().is_empty() {
            return Err(RecoveryError::client(
                ERROR_CODE_INVALID_USERNAME,
                "Username cannot be empty.",
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RecoveryError::client(
                ERROR_CODE_WEAK_PASSWORD,
                format!("Password must contain at least {MIN_PASSWORD_LENGTH} characters."),
            ));
        }

        let tenant_domain = user
            .tenant_domain
            .unwrap_or_else(|| SUPER_TENANT_DOMAIN.to_string());
        if !self.is_known_tenant(&tenant_domain) {
            return Err(RecoveryError::client(
                ERROR_CODE_INVALID_TENANT,
                format!("Invalid tenant '{tenant_domain}'."),
            ));
        }

        let key = UserKey {
            tenant_domain,
            user_store_domain: user.user_store_domain.to_uppercase(),
            username: user.username,
        };
        // argon2 is costly; a known duplicate is rejected before hashing
        if self.users.read().await.contains_key(&key) {
            return Err(user_already_exists(&key.username));
        }

        let password_hash = self.password_hasher.hash(&password)?;

        // a concurrent registration may have won between the two locks
        match self.users.write().await.entry(key.clone()) {
            Entry::Occupied(_) => return Err(user_already_exists(&key.username)),
            Entry::Vacant(slot) => {
                slot.insert(StoredUser {
                    password_hash,
                    claims: claims.into_iter().map(|c| (c.uri, c.value)).collect(),
                    created_at: Utc::now(),
                });
            }
        }

        info!(
            username = %key.username,
            user_store_domain = %key.user_store_domain,
            tenant_domain = %key.tenant_domain,
            channel = %self.notification_channel,
            "Self sign-up user created"
        );

        Ok(Some(NotificationResult {
            code: SUCCESS_CODE_USER_CREATED.to_string(),
            message: "Successful user self registration. Pending account verification."
                .to_string(),
            notification_channel: Some(self.notification_channel.clone()),
            recovery_id: Uuid::new_v4().to_string(),
        }))
    }
}

#[async_trait]
impl<P: PasswordHasher + 'static> UserInformationService for InMemoryUserStore<P> {
    async fn get_retained_user_information(
        &self,
        username: &str,
        user_store_domain: &str,
        tenant_id: i32,
    ) -> Result<UserAttributes, UserExportError> {
        let tenant_domain = self
            .tenants
            .get(&tenant_id)
            .ok_or_else(|| UserExportError(format!("Tenant {tenant_id} is not known")))?;

        let key = UserKey {
            tenant_domain: tenant_domain.clone(),
            user_store_domain: user_store_domain.to_uppercase(),
            username: username.to_string(),
        };
        let users = self.users.read().await;
        let stored = users.get(&key).ok_or_else(|| {
            UserExportError(format!(
                "User {username} does not exist in user store {}",
                key.user_store_domain
            ))
        })?;

        let mut attributes: UserAttributes = stored
            .claims
            .iter()
            .map(|(uri, value)| (uri.clone(), Value::String(value.clone())))
            .collect();
        attributes.insert("username".to_string(), Value::String(key.username.clone()));
        attributes.insert(
            "userStoreDomain".to_string(),
            Value::String(key.user_store_domain.clone()),
        );
        attributes.insert(
            "tenantDomain".to_string(),
            Value::String(key.tenant_domain.clone()),
        );
        attributes.insert(
            "createdAt".to_string(),
            Value::String(stored.created_at.to_rfc3339()),
        );
        Ok(attributes)
    }
}
