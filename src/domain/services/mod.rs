pub mod identity_config;
pub mod password_service;
pub mod user_information_service;
pub mod user_self_registration_manager;
