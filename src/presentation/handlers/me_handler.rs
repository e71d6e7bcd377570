use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    domain::{
        models::{caller::RequestContext, registration::SelfRegistrationRequest},
        services::{
            identity_config::IdentityConfig, user_information_service::UserInformationService,
            user_self_registration_manager::UserSelfRegistrationManager,
        },
    },
    presentation::response_shaper::ResponseShaper,
    usecase::{
        context_resolver::ContextResolver, get_me_usecase::GetMeUsecase,
        register_user_usecase::RegisterUserUsecase,
    },
};

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router
pub fn create_me_router<
    I: UserInformationService + Send + Sync + 'static + Clone,
    M: UserSelfRegistrationManager + Send + Sync + 'static + Clone,
    C: IdentityConfig + 'static + Clone,
>(
    get_me_service: GetMeUsecase<I>,
    register_service: RegisterUserUsecase<M>,
    config: Arc<C>,
) -> Router {
    let state = AppState {
        context_resolver: Arc::new(ContextResolver::new(config.clone())),
        get_me_service: Arc::new(get_me_service),
        register_service: Arc::new(register_service),
        response_shaper: Arc::new(ResponseShaper::new(config)),
    };

    Router::new()
        .route("/me", get(get_me::<I, M, C>).post(register_me::<I, M, C>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<I: UserInformationService, M: UserSelfRegistrationManager, C: IdentityConfig> {
    pub context_resolver: Arc<ContextResolver<C>>,
    pub get_me_service: Arc<GetMeUsecase<I>>,
    pub register_service: Arc<RegisterUserUsecase<M>>,
    pub response_shaper: Arc<ResponseShaper<C>>,
}

// handler function

/// handler function for reading the caller's own attributes
async fn get_me<
    I: UserInformationService + Send + Sync,
    M: UserSelfRegistrationManager + Send + Sync,
    C: IdentityConfig,
>(
    State(state): State<AppState<I, M, C>>,
    context: RequestContext,
) -> Response {
    let caller = match state.context_resolver.resolve_caller(&context) {
        Ok(caller) => caller,
        Err(e) => return (StatusCode::UNAUTHORIZED, e.to_string()).into_response(),
    };

    match state.get_me_service.get_me(&caller).await {
        Ok(attributes) => (StatusCode::OK, Json(attributes)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// handler function for self registration
async fn register_me<
    I: UserInformationService + Send + Sync,
    M: UserSelfRegistrationManager + Send + Sync + 'static,
    C: IdentityConfig,
>(
    State(state): State<AppState<I, M, C>>,
    context: RequestContext,
    Json(payload): Json<SelfRegistrationRequest>,
) -> Response {
    let request = state
        .context_resolver
        .normalize(payload, context.tenant_name_from_context.as_deref());
    let outcome = state.register_service.register(request).await;
    state.response_shaper.shape(outcome)
}
