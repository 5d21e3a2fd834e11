//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::{ConnectPayload, ServerEvent},
    ui::state::AppState,
    usecase::{ConnectUserUseCase, DisconnectUserUseCase},
};

use super::dispatch::{dispatch, parse_frame};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to generate connection id: {}", e);
            return;
        }
    };

    // Channel through which this connection receives broadcasts
    let (tx, rx) = mpsc::unbounded_channel();

    // Queue the session ack first so it precedes any broadcast on this channel
    let connect_event = ServerEvent::Connect(ConnectPayload {
        id: connection_id.as_str().to_string(),
    });
    match serde_json::to_string(&connect_event) {
        Ok(json) => {
            // rx is held above, so this cannot fail
            let _ = tx.send(json);
            tracing::debug!("Queued '{}' for '{}'", connect_event.name(), connection_id);
        }
        Err(e) => {
            tracing::error!("Failed to serialize connect event: {}", e);
            return;
        }
    }

    let connect_usecase = ConnectUserUseCase::new(state.repository.clone());
    match connect_usecase.execute(connection_id.clone(), tx).await {
        Ok(profile) => {
            tracing::info!(
                "New client connected: '{}' as '{}'",
                connection_id,
                profile.name
            );
        }
        Err(e) => {
            tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
            return;
        }
    }

    run_session(socket, state.clone(), connection_id.clone(), rx).await;

    let disconnect_usecase = DisconnectUserUseCase::new(state.repository.clone());
    if disconnect_usecase.execute(&connection_id).await {
        tracing::info!(
            "User disconnected: '{}' ({} remaining)",
            connection_id,
            disconnect_usecase.count_remaining_users().await
        );
    }
}

/// Pump frames in both directions until either side stops.
async fn run_session(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    let recv_connection_id = connection_id.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match parse_frame(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Dropping frame from '{}': {}",
                                recv_connection_id,
                                e
                            );
                            continue;
                        }
                    };

                    if let Err(e) = dispatch(&state, &recv_connection_id, event).await {
                        tracing::warn!(
                            "Dropping event from '{}': {}",
                            recv_connection_id,
                            e
                        );
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    tracing::debug!("Session loop for '{}' finished", connection_id);
}
