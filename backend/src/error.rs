//! Error types for the server
//!
//! Only startup failures (bad environment, bad ruleset) are fatal.
//! Per-request failures map onto HTTP status codes before the WebSocket
//! upgrade; per-move failures never get this far.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gridduel::core::CoreError;
use gridduel::game::GameError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// An environment variable was set but could not be parsed
    #[error("Invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    /// Ruleset file could not be loaded or validated
    #[error(transparent)]
    Ruleset(#[from] CoreError),

    /// The ruleset was rejected while building a session
    #[error(transparent)]
    Game(#[from] GameError),

    /// Session ids are 1-32 characters of `[A-Za-z0-9_-]`
    #[error("Invalid session id {0:?}")]
    InvalidSessionId(String),

    /// The registry is full
    #[error("Session limit of {0} reached")]
    SessionLimit(usize),

    /// The session task has stopped
    #[error("Session {0} is closed")]
    SessionClosed(String),
}

/// Result type alias for server operations
pub type BackendResult<T> = Result<T, BackendError>;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match self {
            BackendError::InvalidSessionId(_) => StatusCode::BAD_REQUEST,
            BackendError::SessionLimit(_) => StatusCode::SERVICE_UNAVAILABLE,
            BackendError::SessionClosed(_) => StatusCode::GONE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
