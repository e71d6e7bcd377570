use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::{
    constants::EXTERNAL_NOTIFICATION_CHANNEL,
    models::registration::{ClientErrorKind, NotificationResult, RegistrationOutcome},
    services::identity_config::IdentityConfig,
};

/// json for detailed registration response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedSuccessBody {
    pub code: String,
    pub message: String,
    pub notification_channel: Option<String>,
    pub confirmation_code: String,
}

impl From<NotificationResult> for DetailedSuccessBody {
    fn from(result: NotificationResult) -> Self {
        Self {
            code: result.code,
            message: result.message,
            notification_channel: result.notification_channel,
            confirmation_code: result.recovery_id,
        }
    }
}

/// json for error response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ClientErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Conflict => StatusCode::CONFLICT,
            Self::BadRequest => StatusCode::BAD_REQUEST,
        }
    }
}

/// Turns a registration outcome into the HTTP response for `POST /me`.
pub struct ResponseShaper<C: IdentityConfig> {
    config: Arc<C>,
}

impl<C: IdentityConfig> ResponseShaper<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }

    pub fn shape(&self, outcome: RegistrationOutcome) -> Response {
        match outcome {
            RegistrationOutcome::Success(result) => self.success(result),
            RegistrationOutcome::ClientError {
                kind,
                code,
                message,
            } => (kind.status(), Json(ErrorBody { code, message })).into_response(),
            RegistrationOutcome::ServerError { code, message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { code, message }),
            )
                .into_response(),
        }
    }

    fn success(&self, result: Option<NotificationResult>) -> Response {
        // read on every call, the flag may change while the server runs
        if self.config.is_detailed_response_enabled() {
            return match result {
                Some(result) => {
                    (StatusCode::CREATED, Json(DetailedSuccessBody::from(result))).into_response()
                }
                None => StatusCode::CREATED.into_response(),
            };
        }

        // Legacy shape: the recovery id only leaves the server when the client
        // is the one delivering it.
        match result {
            Some(result)
                if result.notification_channel.as_deref()
                    == Some(EXTERNAL_NOTIFICATION_CHANNEL) =>
            {
                (StatusCode::CREATED, result.recovery_id).into_response()
            }
            _ => StatusCode::CREATED.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::http::header;
    use http_body_util::BodyExt;
    use rstest::*;

    use super::*;

    struct SwitchableConfig(Mutex<Option<String>>);

    impl SwitchableConfig {
        fn set(&self, value: Option<&str>) {
            *self.0.lock().unwrap() = value.map(str::to_string);
        }
    }

    impl IdentityConfig for SwitchableConfig {
        fn property(&self, _key: &str) -> Option<String> {
            self.0.lock().unwrap().clone()
        }

        fn primary_domain_name(&self) -> String {
            "PRIMARY".to_string()
        }
    }

    fn shaper(flag: Option<&str>) -> (ResponseShaper<SwitchableConfig>, Arc<SwitchableConfig>) {
        let config = Arc::new(SwitchableConfig(Mutex::new(flag.map(str::to_string))));
        (ResponseShaper::new(config.clone()), config)
    }

    fn notification(channel: Option<&str>) -> NotificationResult {
        NotificationResult {
            code: "I1".to_string(),
            message: "sent".to_string(),
            notification_channel: channel.map(str::to_string),
            recovery_id: "R-123".to_string(),
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_legacy_external_channel_returns_recovery_id() {
        let (shaper, _) = shaper(None);
        let response = shaper.shape(RegistrationOutcome::Success(Some(notification(Some(
            "EXTERNAL",
        )))));

        assert_eq!(StatusCode::CREATED, response.status());
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with(mime::TEXT_PLAIN.as_ref()));
        assert_eq!("R-123", body_text(response).await);
    }

    #[rstest]
    #[case(Some("EMAIL"))]
    #[case(Some("SMS"))]
    #[case(Some(""))]
    #[case(Some("external"))]
    #[case(None)]
    #[tokio::test]
    async fn test_legacy_internal_channel_hides_recovery_id(#[case] channel: Option<&str>) {
        let (shaper, _) = shaper(Some("false"));
        let response = shaper.shape(RegistrationOutcome::Success(Some(notification(channel))));

        assert_eq!(StatusCode::CREATED, response.status());
        assert_eq!("", body_text(response).await);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("true"))]
    #[tokio::test]
    async fn test_success_without_result_is_empty(#[case] flag: Option<&str>) {
        let (shaper, _) = shaper(flag);
        let response = shaper.shape(RegistrationOutcome::Success(None));

        assert_eq!(StatusCode::CREATED, response.status());
        assert_eq!("", body_text(response).await);
    }

    #[tokio::test]
    async fn test_detailed_body_renames_recovery_id() {
        let (shaper, _) = shaper(Some("true"));
        let response = shaper.shape(RegistrationOutcome::Success(Some(notification(Some(
            "EMAIL",
        )))));

        assert_eq!(StatusCode::CREATED, response.status());
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            serde_json::json!({
                "code": "I1",
                "message": "sent",
                "notificationChannel": "EMAIL",
                "confirmationCode": "R-123"
            }),
            body
        );
    }

    #[tokio::test]
    async fn test_flag_is_reread_on_each_call() {
        let (shaper, config) = shaper(None);
        let outcome = RegistrationOutcome::Success(Some(notification(Some("EMAIL"))));

        let legacy = shaper.shape(outcome.clone());
        assert_eq!("", body_text(legacy).await);

        config.set(Some("true"));
        let detailed = shaper.shape(outcome);
        let body: DetailedSuccessBody =
            serde_json::from_str(&body_text(detailed).await).unwrap();
        assert_eq!("R-123", body.confirmation_code);
    }

    #[rstest]
    #[case(ClientErrorKind::Conflict, StatusCode::CONFLICT)]
    #[case(ClientErrorKind::BadRequest, StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn test_client_errors(#[case] kind: ClientErrorKind, #[case] status: StatusCode) {
        let (shaper, _) = shaper(None);
        let response = shaper.shape(RegistrationOutcome::ClientError {
            kind,
            code: "20030".to_string(),
            message: "user exists".to_string(),
        });

        assert_eq!(status, response.status());
        let body: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            ErrorBody {
                code: "20030".to_string(),
                message: "user exists".to_string()
            },
            body
        );
    }

    #[tokio::test]
    async fn test_server_error_hides_cause() {
        let (shaper, _) = shaper(None);
        let response = shaper.shape(RegistrationOutcome::ServerError {
            code: "20013".to_string(),
            message: "Server error".to_string(),
            cause: "secret internals".to_string(),
        });

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        let text = body_text(response).await;
        assert!(!text.contains("secret internals"));
        let body: ErrorBody = serde_json::from_str(&text).unwrap();
        assert_eq!("20013", body.code);
    }
}
