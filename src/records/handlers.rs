use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AdminUser,
    error::ApiError,
    records::{
        dto::PageQuery,
        repo::{Collection, Document, InsertResult},
    },
    state::AppState,
};

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/patients", get(list_patients).put(insert_patient))
}

#[instrument(skip(state))]
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let (skip, limit) = page.window();
    let doctors = state
        .documents
        .find_page(Collection::Doctors, skip, limit)
        .await?;
    Ok(Json(doctors))
}

#[instrument(skip(state, patient))]
pub async fn insert_patient(
    State(state): State<AppState>,
    Json(patient): Json<Map<String, Value>>,
) -> Result<Json<InsertResult>, ApiError> {
    let res = state.documents.insert(Collection::Patients, patient).await?;
    info!(id = %res.inserted_id, "patient inserted");
    Ok(Json(res))
}

#[instrument(skip(state, _admin))]
pub async fn list_patients(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.documents.find_all(Collection::Patients).await?))
}
