use crate::domain::constants::ENABLE_DETAILED_API_RESPONSE;

/// Read access to the identity server configuration.
///
/// Implementations must be safe to read from many requests at once and must
/// not cache values that operators can change at runtime.
pub trait IdentityConfig: Send + Sync {
    fn property(&self, key: &str) -> Option<String>;

    fn primary_domain_name(&self) -> String;

    /// Whether `POST /me` answers with the detailed JSON body.
    /// Anything other than a case-insensitive `true` counts as off.
    fn is_detailed_response_enabled(&self) -> bool {
        self.property(ENABLE_DETAILED_API_RESPONSE)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}
