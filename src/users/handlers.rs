use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AdminUser,
    error::ApiError,
    state::AppState,
    users::{
        dto::{UpsertResponse, UpsertUserRequest},
        repo_types::User,
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).put(upsert_user))
        .route("/users/:email", get(get_user))
}

#[instrument(skip(state, admin))]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await?;
    info!(admin = %admin.0.email, count = users.len(), "users listed");
    Ok(Json(users))
}

/// Responds with `null` when no user matches.
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Option<User>>, ApiError> {
    Ok(Json(state.users.find_by_email(&email).await?))
}

#[instrument(skip(state, payload))]
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(payload): Json<UpsertUserRequest>,
) -> Result<Json<UpsertResponse>, ApiError> {
    let res = services::upsert_user(
        state.users.as_ref(),
        &state.notifier,
        state.config.password.cost,
        payload,
    )
    .await?;
    Ok(Json(res))
}
