pub mod caller;
pub mod credential;
pub mod registration;
pub mod user_attributes;
