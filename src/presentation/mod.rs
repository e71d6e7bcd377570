pub mod handlers;
pub mod request_context;
pub mod response_shaper;
