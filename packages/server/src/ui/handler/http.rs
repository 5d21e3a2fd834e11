//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hiroba_shared::time::timestamp_to_rfc3339;

use crate::{infrastructure::dto::http::PresenceDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Currently connected users, sorted by connection id
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<Vec<PresenceDto>> {
    let presences = state.repository.list_presences().await;

    let users = presences
        .into_iter()
        .map(|p| PresenceDto {
            id: p.profile.id.into_string(),
            name: p.profile.name,
            avatar: p.profile.avatar,
            connected_at: timestamp_to_rfc3339(p.connected_at.value()),
        })
        .collect();

    Json(users)
}
