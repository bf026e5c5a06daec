use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::error;

/// Message returned for transport failures and malformed payloads.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body shape a route uses for failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{"success": false, "message": ...}`
    Message,
    /// `{"error": ...}`
    Error,
}

impl Envelope {
    #[must_use]
    pub fn failure(self, message: &str) -> Value {
        match self {
            Self::Message => json!({ "success": false, "message": message }),
            Self::Error => json!({ "error": message }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Required input absent; never forwarded to the backend.
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("{0}")]
    Unauthenticated(&'static str),

    /// Non-success backend status, relayed with the backend's message or a fallback.
    #[error("backend responded with {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) | Self::InvalidJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error in the body shape the route documents.
    #[must_use]
    pub fn into_response_with(self, envelope: Envelope) -> Response {
        let status = self.status();
        let body = match &self {
            Self::MissingFields(message) | Self::Unauthenticated(message) => {
                envelope.failure(message)
            }
            Self::Upstream { message, .. } => envelope.failure(message),
            Self::Transport(err) => {
                error!("Backend request failed: {err}");
                envelope.failure(INTERNAL_ERROR_MESSAGE)
            }
            Self::InvalidJson(err) => {
                error!("Invalid JSON payload: {err}");
                envelope.failure(INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        self.into_response_with(Envelope::Message)
    }
}
