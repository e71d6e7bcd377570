/// Notification channel meaning the client delivers the confirmation code itself.
pub const EXTERNAL_NOTIFICATION_CHANNEL: &str = "EXTERNAL";

pub const ERROR_CODE_USER_ALREADY_EXISTS: &str = "20030";
pub const ERROR_CODE_UNEXPECTED: &str = "20013";

pub const SERVER_ERROR_MESSAGE: &str = "Error occurred in the server while performing the task.";

// configuration keys
pub const ENABLE_DETAILED_API_RESPONSE: &str = "ENABLE_DETAILED_API_RESPONSE";
pub const PRIMARY_DOMAIN_NAME: &str = "PRIMARY_DOMAIN_NAME";
/// Extra tenants known to the local user store, as `<id>:<domain>` pairs separated by commas.
pub const TENANTS: &str = "TENANTS";

pub const DEFAULT_PRIMARY_DOMAIN_NAME: &str = "PRIMARY";
pub const DOMAIN_SEPARATOR: char = '/';

pub const SUPER_TENANT_ID: i32 = -1234;
pub const SUPER_TENANT_DOMAIN: &str = "carbon.super";
