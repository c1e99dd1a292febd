//! Game listener routes
//!
//! - `GET /` upgrades into the default session
//! - `GET /sessions/{id}` upgrades into session `id`
//! - `POST /sessions` hands out a fresh session id
//! - `GET /health` reports liveness and the session count

use crate::error::BackendResult;
use crate::game::{ClientId, SessionRegistry, DEFAULT_SESSION, OUTBOX_CAPACITY};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Json, Path, State,
    },
    response::Response,
    routing::{get, post},
    Router,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use shared::protocol::{ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub registry: SessionRegistry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(default_session_socket))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(session_socket))
        .route("/health", get(health))
        .with_state(state)
}

async fn default_session_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> BackendResult<Response> {
    upgrade(ws, state, DEFAULT_SESSION.to_string())
}

async fn session_socket(
    ws: WebSocketUpgrade,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> BackendResult<Response> {
    upgrade(ws, state, id)
}

/// Refuse bad ids and full registries before the upgrade
fn upgrade(ws: WebSocketUpgrade, state: AppState, id: String) -> BackendResult<Response> {
    state.registry.check_admission(&id)?;
    Ok(ws.on_upgrade(move |socket| client_connection(socket, state.registry, id)))
}

async fn create_session(
    State(state): State<AppState>,
) -> BackendResult<Json<CreateSessionResponse>> {
    let session_id = state.registry.generate_session_id()?;
    info!("[API] Issued session id {}", session_id);
    Ok(Json(CreateSessionResponse { session_id }))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions: state.registry.len(),
    })
}

/// Pump one WebSocket until either side hangs up
///
/// Outbound frames go through the client's bounded outbox. The session owns
/// the only sender, so when it drops a client that fell behind the writer
/// ends and the socket is closed.
async fn client_connection(socket: WebSocket, registry: SessionRegistry, id: String) {
    let client: ClientId = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut inbox) = mpsc::channel::<ServerMessage>(OUTBOX_CAPACITY);

    let session = match registry.join(&id, client, outbox).await {
        Ok(session) => session,
        Err(e) => {
            warn!("[API] Client {} could not join {}: {}", client, id, e);
            let _ = sink.close().await;
            return;
        }
    };
    info!("[API] Client {} connected to session {}", client, id);

    let mut writer = tokio::spawn(async move {
        while let Some(message) = inbox.recv().await {
            let text = match message.to_json() {
                Ok(text) => text,
                Err(e) => {
                    warn!("[API] Failed to encode outbound message: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    loop {
        let frame = tokio::select! {
            frame = stream.next() => frame,
            _ = &mut writer => break,
        };
        let text = match frame {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                debug!("[API] Client {} socket error: {}", client, e);
                break;
            }
        };

        let sent = match ClientMessage::parse(text.as_str()) {
            Ok(ClientMessage::Move { proposal }) => session.propose(client, proposal),
            Err(e) => {
                warn!("[API] Dropping frame from {}: {}", client, e);
                session.report_malformed(client)
            }
        };
        if sent.is_err() {
            break;
        }
    }

    let _ = session.leave(client);
    writer.abort();
    info!("[API] Client {} left session {}", client, id);
}
