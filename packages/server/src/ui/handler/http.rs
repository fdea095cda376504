//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, response::Html};

use crate::{
    infrastructure::dto::http::{ConnectionDetailDto, ConnectionsDto, HealthDto},
    ui::state::AppState,
};
use tsunagi_shared::time::timestamp_to_rfc3339;

/// Demo page that connects to `/ws` and logs relay events
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// List live connections
pub async fn get_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionsDto> {
    let connections: Vec<ConnectionDetailDto> = state
        .dispatcher
        .connections()
        .await
        .into_iter()
        .map(|connection| ConnectionDetailDto {
            sid: connection.id.into_string(),
            connected_at: timestamp_to_rfc3339(connection.connected_at.value()),
        })
        .collect();

    Json(ConnectionsDto {
        count: connections.len(),
        connections,
    })
}
