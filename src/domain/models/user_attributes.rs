use serde_json::{Map, Value};

/// Retained attributes of a user, keyed by attribute name.
pub type UserAttributes = Map<String, Value>;
