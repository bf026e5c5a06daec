//! Session lookup for the signed-in user.
//!
//! Reads the `token` cookie and forwards it to the backend as a bearer token.
//! The backend's user payload is relayed unchanged.

use crate::api::{
    backend::Backend,
    error::{Envelope, ProxyError},
};
use axum::{
    Json,
    extract::Extension,
    http::{
        HeaderMap,
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
    },
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const TOKEN_COOKIE_NAME: &str = "token";

const BACKEND_PATH: &str = "/api/auth/me";
const UNAUTHENTICATED_MESSAGE: &str = "Not authenticated";
const FAILURE_MESSAGE: &str = "Failed to fetch user";

#[utoipa::path(
    get,
    path = "/api/me",
    responses (
        (status = 200, description = "Return the user resolved from the token cookie."),
        (status = 401, description = "Missing token cookie, or token rejected by the backend."),
        (status = 500, description = "Backend unreachable or malformed payload."),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn get_me(headers: HeaderMap, backend: Extension<Arc<Backend>>) -> Response {
    match forward(&headers, &backend).await {
        Ok(response) => response,
        Err(err) => err.into_response_with(Envelope::Error),
    }
}

async fn forward(headers: &HeaderMap, backend: &Backend) -> Result<Response, ProxyError> {
    let token = extract_cookie(headers, TOKEN_COOKIE_NAME)
        .ok_or(ProxyError::Unauthenticated(UNAUTHENTICATED_MESSAGE))?;

    let reply = backend
        .send(
            backend
                .get(BACKEND_PATH)
                .header(CONTENT_TYPE, "application/json")
                .header(AUTHORIZATION, format!("Bearer {token}")),
        )
        .await?;

    if !reply.is_success() {
        let message = reply
            .text_field(&["error", "message"])
            .unwrap_or_else(|| FAILURE_MESSAGE.to_string());

        debug!(status = %reply.status, "Session lookup rejected: {message}");

        return Err(ProxyError::Upstream {
            status: reply.status,
            message,
        });
    }

    let user: Value = reply.json()?;

    Ok((reply.status, Json(user)).into_response())
}

/// Value of the named cookie, ignoring empty values.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let mut parts = pair.trim().splitn(2, '=');
            let key = parts.next()?.trim();
            let val = parts.next()?.trim();
            (key == name && !val.is_empty()).then(|| val.to_string())
        })
}
