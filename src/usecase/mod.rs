pub mod context_resolver;
pub mod get_me_usecase;
pub mod register_user_usecase;
