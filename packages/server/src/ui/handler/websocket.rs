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
use parley_shared::protocol::Frame;
use tokio::sync::mpsc;

use crate::{
    ui::state::AppState,
    usecase::{ConnectParticipantUseCase, DisconnectParticipantUseCase, RelayEventUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive relayed frames
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let connection_id = ConnectParticipantUseCase::new(state.registry.clone())
        .execute(tx)
        .await;
    tracing::info!("Connection {} opened", connection_id);

    let relay_usecase = RelayEventUseCase::new(state.registry.clone());

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let frame = match Frame::from_json(text.as_str()) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::warn!("Dropping malformed frame from {}: {}", connection_id, e);
                            continue;
                        }
                    };
                    tracing::debug!("Received '{}' from {}", frame.event, connection_id);

                    match relay_usecase.execute(&connection_id, frame).await {
                        Ok(delivered) if !delivered.is_empty() => {
                            tracing::debug!("Relayed to {} connection(s)", delivered.len());
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!("Not relayed from {}: {}", connection_id, e),
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward relayed frames to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let username = DisconnectParticipantUseCase::new(state.registry.clone())
        .execute(&connection_id)
        .await;
    match username {
        Some(username) => tracing::info!("Connection {} ('{}') closed", connection_id, username),
        None => tracing::info!("Connection {} closed", connection_id),
    }
}
