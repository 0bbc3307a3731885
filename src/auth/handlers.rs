use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::{auth::jwt::JwtKeys, error::ApiError, state::AppState};

/// Response of `POST /jwt`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub fn token_routes() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_token))
}

#[instrument(skip(keys, payload))]
pub async fn issue_token(
    State(keys): State<JwtKeys>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = payload.get("email").and_then(Value::as_str).map(str::to_owned);
    let token = keys.sign(payload)?;
    info!(email = ?email, "token issued");
    Ok(Json(TokenResponse { token }))
}
