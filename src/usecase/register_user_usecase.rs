use std::{error::Error, sync::Arc};

use tracing::{debug, error};

use crate::domain::{
    constants::{ERROR_CODE_UNEXPECTED, ERROR_CODE_USER_ALREADY_EXISTS, SERVER_ERROR_MESSAGE},
    error::RecoveryError,
    models::registration::{
        ClientErrorKind, NotificationResult, RegistrationOutcome, SelfRegistrationRequest,
    },
    services::user_self_registration_manager::UserSelfRegistrationManager,
};

pub struct RegisterUserUsecase<M: UserSelfRegistrationManager> {
    registration_manager: Arc<M>,
}

impl<M> RegisterUserUsecase<M>
where
    M: UserSelfRegistrationManager + Send + Sync + 'static,
{
    pub fn new(registration_manager: M) -> Self {
        Self {
            registration_manager: Arc::new(registration_manager),
        }
    }

    /// Submit an already normalized request and classify what comes back.
    ///
    /// Never fails: every fault ends up as a [`RegistrationOutcome`] variant.
    pub async fn register(&self, request: SelfRegistrationRequest) -> RegistrationOutcome {
        let user = request.user();
        let claims = request.claims();
        let properties = request.properties();
        let password = request.user.password;

        let manager = Arc::clone(&self.registration_manager);
        // run on its own task so a panicking manager surfaces as a JoinError
        let submitted = tokio::spawn(async move {
            manager
                .register_user(user, password, claims, properties)
                .await
        })
        .await;

        match submitted {
            Ok(result) => classify(result),
            Err(join_error) => unexpected(&join_error),
        }
    }
}

/// Map the manager's answer onto an outcome, logging where the caller
/// only gets a generic response.
pub fn classify(result: Result<Option<NotificationResult>, RecoveryError>) -> RegistrationOutcome {
    match result {
        Ok(notification) => RegistrationOutcome::Success(notification),
        Err(RecoveryError::Client { code, message }) => {
            let kind = if code == ERROR_CODE_USER_ALREADY_EXISTS {
                ClientErrorKind::Conflict
            } else {
                debug!(%code, %message, "Client error while registering self sign-up user");
                ClientErrorKind::BadRequest
            };
            RegistrationOutcome::ClientError {
                kind,
                code,
                message,
            }
        }
        Err(RecoveryError::Server { code, message }) => RegistrationOutcome::ServerError {
            code,
            message: SERVER_ERROR_MESSAGE.to_string(),
            cause: message,
        },
        Err(err @ RecoveryError::Unexpected(_)) => unexpected(&err),
    }
}

fn unexpected(cause: &(dyn Error + 'static)) -> RegistrationOutcome {
    let chain = error_chain(cause);
    error!(error = %chain, "Unexpected error while registering self sign-up user");
    RegistrationOutcome::ServerError {
        code: ERROR_CODE_UNEXPECTED.to_string(),
        message: SERVER_ERROR_MESSAGE.to_string(),
        cause: chain,
    }
}

/// `outer: inner: root` rendering of an error and its sources.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        rendered.push_str(": ");
        rendered.push_str(&inner.to_string());
        source = inner.source();
    }
    rendered
}
