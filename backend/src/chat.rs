//! Chat relay
//!
//! Every `CHAT` frame is forwarded verbatim to all other connected chat
//! clients. Nothing is stored.

use crate::game::ClientId;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use shared::chat::ChatMessage;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct ChatRelay {
    tx: broadcast::Sender<(ClientId, ChatMessage)>,
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRelay {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Connected chat clients
    pub fn subscribers(&self) -> usize {
        self.tx.receiver_count()
    }

    fn relay(&self, from: ClientId, message: ChatMessage) {
        // No receivers just means nobody is listening
        let _ = self.tx.send((from, message));
    }
}

pub fn router(relay: ChatRelay) -> Router {
    Router::new().route("/", get(chat_socket)).with_state(relay)
}

async fn chat_socket(ws: WebSocketUpgrade, State(relay): State<ChatRelay>) -> Response {
    ws.on_upgrade(move |socket| chat_connection(socket, relay))
}

async fn chat_connection(socket: WebSocket, relay: ChatRelay) {
    let client: ClientId = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let mut rx = relay.tx.subscribe();
    info!(
        "[CHAT] Client {} connected ({} online)",
        client,
        relay.subscribers()
    );

    let writer = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok((from, _)) if from == client => continue,
                Ok((_, message)) => {
                    let text = match serde_json::to_string(&message) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!("[CHAT] Failed to encode message: {}", e);
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "[CHAT] Client {} lagged, skipped {} messages",
                        client, skipped
                    );
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };

        match serde_json::from_str::<ChatMessage>(text.as_str()) {
            Ok(message) => {
                debug!("[CHAT] {}: {}", client, message.text());
                relay.relay(client, message);
            }
            Err(e) => warn!("[CHAT] Dropping frame from {}: {}", client, e),
        }
    }

    writer.abort();
    info!("[CHAT] Client {} disconnected", client);
}
