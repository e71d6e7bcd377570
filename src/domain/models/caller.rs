use crate::domain::constants::DOMAIN_SEPARATOR;

/// Raw caller coordinates as handed over by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub authenticated_user: Option<String>,
    pub tenant_id: i32,
    pub tenant_name_from_context: Option<String>,
}

/// Identity of the caller for the lifetime of one request.
///
/// The tenant name stays on [`RequestContext`]; only registration reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    username: String,
    user_store_domain: String,
    tenant_id: i32,
}

impl CallerContext {
    /// Build from a possibly domain-qualified name such as `PRIMARY/alice`.
    /// Names without a domain part fall into `primary_domain`.
    pub fn new(qualified_username: &str, primary_domain: &str, tenant_id: i32) -> Self {
        let (user_store_domain, username) = split_domain(qualified_username, primary_domain);
        Self {
            username,
            user_store_domain,
            tenant_id,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn user_store_domain(&self) -> &str {
        &self.user_store_domain
    }
    pub fn tenant_id(&self) -> i32 {
        self.tenant_id
    }
}

/// Returns `(domain, bare_username)`. The domain is upper-cased.
///
/// A separator at position 0 is not treated as a domain prefix.
pub fn split_domain(qualified: &str, primary_domain: &str) -> (String, String) {
    match qualified.find(DOMAIN_SEPARATOR) {
        Some(idx) if idx > 0 => (
            qualified[..idx].to_uppercase(),
            qualified[idx + DOMAIN_SEPARATOR.len_utf8()..].to_string(),
        ),
        _ => (primary_domain.to_string(), qualified.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("PRIMARY/alice", "PRIMARY", "alice")]
    #[case("secondary/bob", "SECONDARY", "bob")]
    #[case("carol", "PRIMARY", "carol")]
    #[case("/dave", "PRIMARY", "/dave")]
    #[case("LDAP/eve/x", "LDAP", "eve/x")]
    fn test_split_domain(#[case] input: &str, #[case] domain: &str, #[case] username: &str) {
        let (d, u) = split_domain(input, "PRIMARY");
        assert_eq!(domain, d);
        assert_eq!(username, u);
    }

    #[test]
    fn test_caller_context_strips_prefix() {
        let caller = CallerContext::new("PRIMARY/alice", "PRIMARY", 42);
        assert_eq!("alice", caller.username());
        assert_eq!("PRIMARY", caller.user_store_domain());
        assert_eq!(42, caller.tenant_id());
    }
}
