use crate::domain::{
    error::UserExportError,
    models::{caller::CallerContext, user_attributes::UserAttributes},
    services::user_information_service::UserInformationService,
};

pub struct GetMeUsecase<I: UserInformationService> {
    information_service: I,
}

impl<I: UserInformationService> GetMeUsecase<I> {
    pub fn new(information_service: I) -> Self {
        Self {
            information_service,
        }
    }

    /// Whatever the information service retains for the caller, unfiltered.
    pub async fn get_me(&self, caller: &CallerContext) -> Result<UserAttributes, UserExportError>
    where
        I: Send + Sync,
    {
        self.information_service
            .get_retained_user_information(
                caller.username(),
                caller.user_store_domain(),
                caller.tenant_id(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct RecordingInformationService {
        calls: Mutex<Vec<(String, String, i32)>>,
    }

    #[async_trait]
    impl UserInformationService for RecordingInformationService {
        async fn get_retained_user_information(
            &self,
            username: &str,
            user_store_domain: &str,
            tenant_id: i32,
        ) -> Result<UserAttributes, UserExportError> {
            self.calls.lock().unwrap().push((
                username.to_string(),
                user_store_domain.to_string(),
                tenant_id,
            ));
            match json!({"email": "a@x"}) {
                serde_json::Value::Object(map) => Ok(map),
                _ => unreachable!(),
            }
        }
    }

    #[tokio::test]
    async fn test_get_me_passes_bare_username() {
        let usecase = GetMeUsecase::new(RecordingInformationService::default());
        let caller = CallerContext::new("SECONDARY/bob", "PRIMARY", 7);

        let attributes = usecase.get_me(&caller).await.unwrap();

        assert_eq!(Some(&json!("a@x")), attributes.get("email"));
        let calls = usecase.information_service.calls.lock().unwrap();
        assert_eq!(
            vec![("bob".to_string(), "SECONDARY".to_string(), 7)],
            *calls
        );
    }
}
