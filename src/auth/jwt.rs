use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing::debug;

use crate::{auth::claims::Claims, state::AppState};

/// Lifetime of every issued token.
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Holds JWT signing and verification keys.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: TOKEN_TTL,
        }
    }

    /// Sign `payload` as-is, replacing any `iat`/`exp` with fresh values.
    pub fn sign(&self, mut payload: Map<String, Value>) -> anyhow::Result<String> {
        payload.remove("iat");
        payload.remove("exp");
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            iat,
            exp: iat + self.ttl.as_secs() as i64,
            extra: payload,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(email = ?claims.email(), exp = claims.exp, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // caller-defined claims may carry an arbitrary `aud`
        validation.validate_aud = false;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(email = ?data.claims.email(), "jwt verified");
        Ok(data.claims)
    }
}
