use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Self sign-up payload as posted to `/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfRegistrationRequest {
    pub user: SelfRegistrationUser,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfRegistrationUser {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_domain: Option<String>,
    #[serde(default)]
    pub claims: BTreeMap<String, String>,
}

impl fmt::Debug for SelfRegistrationUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelfRegistrationUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("realm", &self.realm)
            .field("tenant_domain", &self.tenant_domain)
            .field("claims", &self.claims)
            .finish()
    }
}

impl SelfRegistrationRequest {
    /// User handle passed to the registration manager.
    pub fn user(&self) -> User {
        User {
            username: self.user.username.clone(),
            user_store_domain: self.user.realm.clone().unwrap_or_default(),
            tenant_domain: self.user.tenant_domain.clone(),
        }
    }

    pub fn claims(&self) -> Vec<Claim> {
        self.user
            .claims
            .iter()
            .map(|(uri, value)| Claim {
                uri: uri.clone(),
                value: value.clone(),
            })
            .collect()
    }

    pub fn properties(&self) -> Vec<Property> {
        self.properties
            .iter()
            .map(|(key, value)| Property {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub user_store_domain: String,
    pub tenant_domain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub uri: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: String,
}

/// What the registration manager reports after creating the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub code: String,
    pub message: String,
    pub notification_channel: Option<String>,
    pub recovery_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Conflict,
    BadRequest,
}

/// Classified result of one self-registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success(Option<NotificationResult>),
    ClientError {
        kind: ClientErrorKind,
        code: String,
        message: String,
    },
    ServerError {
        code: String,
        message: String,
        cause: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_camel_case() {
        let body = r#"{
            "user": {
                "username": "alice",
                "password": "password1",
                "tenantDomain": "acme.com",
                "claims": {"http://wso2.org/claims/emailaddress": "a@x"}
            },
            "properties": {"callback": "https://app"}
        }"#;
        let request: SelfRegistrationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(Some("acme.com".to_string()), request.user.tenant_domain);
        assert_eq!(None, request.user.realm);

        let claims = request.claims();
        assert_eq!(1, claims.len());
        assert_eq!("http://wso2.org/claims/emailaddress", claims[0].uri);
        assert_eq!(
            vec![Property {
                key: "callback".to_string(),
                value: "https://app".to_string()
            }],
            request.properties()
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let user = SelfRegistrationUser {
            username: "alice".to_string(),
            password: "hunter22".to_string(),
            realm: None,
            tenant_domain: None,
            claims: BTreeMap::new(),
        };
        assert!(!format!("{user:?}").contains("hunter22"));
    }
}
