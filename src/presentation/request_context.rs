use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
};

use crate::domain::{constants::SUPER_TENANT_ID, error::DomainError, models::caller::RequestContext};

// Set by the authenticating proxy in front of this service.
pub const AUTHENTICATED_USER_HEADER: &str = "x-authenticated-user";
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const TENANT_NAME_HEADER: &str = "x-tenant-name";

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_headers(&parts.headers).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
    }
}

fn parse_headers(headers: &HeaderMap) -> Result<RequestContext, DomainError> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    // a tenant id that is present but unreadable must not fall back to the super tenant
    let tenant_id = match headers.get(TENANT_ID_HEADER) {
        Some(value) => {
            let raw = value.to_str().map_err(|_| {
                DomainError::InvalidTenantId(String::from_utf8_lossy(value.as_bytes()).into_owned())
            })?;
            raw.trim()
                .parse::<i32>()
                .map_err(|_| DomainError::InvalidTenantId(raw.to_string()))?
        }
        None => SUPER_TENANT_ID,
    };

    Ok(RequestContext {
        authenticated_user: header(AUTHENTICATED_USER_HEADER),
        tenant_id,
        tenant_name_from_context: header(TENANT_NAME_HEADER),
    })
}
