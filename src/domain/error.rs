use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No authenticated user in request context")]
    Unauthenticated,

    #[error("Invalid tenant id: {0}")]
    InvalidTenantId(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid tenant entry '{0}', expected <id>:<domain>")]
    InvalidTenantEntry(String),
}

/// Faults raised by the self-registration manager.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// Caused by the caller's input. Code and message are safe to expose.
    #[error("{message}")]
    Client { code: String, message: String },

    #[error("{message}")]
    Server { code: String, message: String },

    #[error("Unexpected error")]
    Unexpected(#[source] BoxError),
}

impl RecoveryError {
    pub fn client(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Client {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn server(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Server {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Raised by the user-information service. The message is shown to the caller as is.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UserExportError(pub String);
