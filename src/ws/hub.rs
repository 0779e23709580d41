//! WebSocket Hub implementation
//!
//! Tracks connected clients and streams roster change events to them

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc,
};

use crate::state::AppState;
use crate::store::{HrStore, StoreEvent};

/// Messages a client may send
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "ping")]
    Ping,
    #[serde(rename = "pong")]
    Pong,
}

/// Messages pushed to a client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "change")]
    Change(StoreEvent),
    /// Client fell behind; it should reload its snapshot
    #[serde(rename = "resync")]
    Resync(u64),
    #[serde(rename = "pong")]
    Pong,
}

/// Connection bookkeeping for one client
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub connected_at: DateTime<Utc>,
}

/// WebSocket Hub
pub struct Hub {
    /// Connected clients by connection id
    clients: DashMap<u64, ClientInfo>,
    next_id: AtomicU64,
}

impl Hub {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a new client, returning its connection id
    pub fn register(&self) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.clients.insert(
            id,
            ClientInfo {
                connected_at: Utc::now(),
            },
        );
        tracing::debug!("WebSocket client registered: {}", id);
        id
    }

    /// Unregister a client, returning what was recorded at connect time
    pub fn unregister(&self, id: u64) -> Option<ClientInfo> {
        let (_, info) = self.clients.remove(&id)?;
        let seconds = (Utc::now() - info.connected_at).num_seconds();
        tracing::debug!("WebSocket client unregistered: {} after {}s", id, seconds);
        Some(info)
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for the next store event and turn it into a client message.
///
/// A lagged receiver yields `Resync` with the current roster version. `None`
/// means the store is gone.
pub async fn next_event_message(
    events: &mut broadcast::Receiver<StoreEvent>,
    store: &HrStore,
) -> Option<ServerMessage> {
    match events.recv().await {
        Ok(event) => Some(ServerMessage::Change(event)),
        Err(RecvError::Lagged(skipped)) => {
            tracing::warn!("WebSocket subscriber lagged by {} events", skipped);
            Some(ServerMessage::Resync(store.version().await))
        }
        Err(RecvError::Closed) => None,
    }
}

/// WebSocket upgrade handler
pub async fn serve_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let client_id = state.hub.register();

    // Subscribe before the first send so no change after connect is missed
    let mut events = state.subscribe();
    let store = state.store.clone();

    let mut send_task = tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                Some(msg) = rx.recv() => msg,
                event = next_event_message(&mut events, &store) => match event {
                    Some(msg) => msg,
                    None => break,
                },
                else => break,
            };

            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to encode WebSocket message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if let Ok(ClientMessage::Ping) = serde_json::from_str::<ClientMessage>(&text) {
                        let _ = tx.send(ServerMessage::Pong);
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Whichever side finishes first takes the other down with it
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.hub.unregister(client_id);
}
