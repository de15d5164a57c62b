use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    domain::{Character, CharacterPatch, NewCharacter},
    state::AppState,
    web::Result,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_characters(State(state): State<AppState>) -> Result<Json<Vec<Character>>> {
    let characters = state.service.list().await?;
    Ok(Json(characters))
}

pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Character>> {
    let character = state.service.get(&id).await?;
    Ok(Json(character))
}

pub async fn create_character(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewCharacter>, JsonRejection>,
) -> Result<(StatusCode, Json<Character>)> {
    let Json(payload) = payload?;
    let created = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CharacterPatch>, JsonRejection>,
) -> Result<Json<Character>> {
    let Json(patch) = payload?;
    let updated = state.service.update(&id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Character>> {
    let removed = state.service.delete(&id).await?;
    Ok(Json(removed))
}
