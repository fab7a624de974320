use std::sync::Arc;

use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::player::actor::PlayerActor;
use crate::session_registry::actor::SessionRegistryClient;
use crate::websocket::{close, send_error};

#[derive(Serialize)]
pub struct CreateSessionResponse {
    id: String,
}

pub async fn create(State(registry): State<Arc<SessionRegistryClient>>) -> Response {
    match registry.open_session().await {
        Ok(id) => (StatusCode::OK, Json(CreateSessionResponse { id })).into_response(),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response(),
    }
}

pub async fn connect_player_to_websocket(
    State(registry): State<Arc<SessionRegistryClient>>,
    Path(session_id): Path<String>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |mut websocket| async move {
        match registry.lookup_session(&session_id).await {
            Ok(session) => PlayerActor::create(session, websocket).await,
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    })
}
