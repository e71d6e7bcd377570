pub mod argon2_password_hasher;
pub mod env_identity_config;
pub mod in_memory_user_store;
