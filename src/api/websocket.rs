//! WebSocket feed of wallet changes
//!
//! Each connected client gets a [`WsEvent::Connected`] greeting, then every
//! [`WalletEvent`] the store publishes, serialized as JSON text frames.

use crate::api::handlers::ApiState;
use crate::store::{WalletEvent, WalletStore};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;

/// Frames sent by the socket layer itself, framed like [`WalletEvent`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsEvent {
    /// Connection established
    Connected { message: String },
}

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ApiState>) -> impl IntoResponse {
    let store = state.store.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, store))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, store: WalletStore) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = store.subscribe();

    let welcome = WsEvent::Connected {
        message: "Connected to wallet event feed".to_string(),
    };
    if let Ok(json) = serde_json::to_string(&welcome) {
        let _ = sender.send(Message::Text(json.into())).await;
    }

    // Forward store events to this client
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let Ok(json) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("WebSocket client lagged, skipped {} event(s)", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Drain incoming frames until the client goes away
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(Message::Text(text)) => {
                    log::debug!("Ignoring client message: {}", text.as_str());
                }
                Err(e) => {
                    log::warn!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    log::info!("WebSocket connection closed");
}
