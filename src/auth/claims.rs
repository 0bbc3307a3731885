use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JWT payload: caller-supplied claims plus the issuer's timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub iat: i64, // issued at (unix seconds)
    pub exp: i64, // expires at (unix seconds)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn email(&self) -> Option<&str> {
        self.extra.get("email").and_then(Value::as_str)
    }
}
