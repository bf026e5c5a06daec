use super::{parse_body, present};
use crate::api::{
    backend::Backend,
    error::{Envelope, ProxyError},
};
use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{instrument, warn};
use utoipa::ToSchema;

const BACKEND_PATH: &str = "/api/users/verify-email";
const MISSING_TOKEN_MESSAGE: &str = "Verification token is required";
const FAILURE_MESSAGE: &str = "Email verification failed";
const SUCCESS_MESSAGE: &str = "Email verified successfully";

#[derive(ToSchema, Serialize, Deserialize, Default)]
pub struct VerifyEmailRequest {
    #[serde(default)]
    token: Option<String>,
}

impl std::fmt::Debug for VerifyEmailRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyEmailRequest")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyEmailResponse {
    success: bool,
    message: String,
}

#[utoipa::path(
    post,
    path = "/api/verify-email",
    request_body = VerifyEmailRequest,
    responses (
        (status = 200, description = "Email verified", body = VerifyEmailResponse),
        (status = 400, description = "Token missing, or rejected by the backend", body = VerifyEmailResponse),
        (status = 500, description = "Backend unreachable or malformed payload", body = VerifyEmailResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn verify_email(backend: Extension<Arc<Backend>>, body: Bytes) -> Response {
    match forward(&backend, &body).await {
        Ok(response) => response,
        Err(err) => err.into_response_with(Envelope::Message),
    }
}

async fn forward(backend: &Backend, body: &Bytes) -> Result<Response, ProxyError> {
    let request: VerifyEmailRequest = parse_body(body)?;

    if !present(request.token.as_deref()) {
        return Err(ProxyError::MissingFields(MISSING_TOKEN_MESSAGE));
    }

    let reply = backend
        .send(backend.post(BACKEND_PATH).json(&request))
        .await?;

    if !reply.is_success() {
        let message = reply
            .text_field(&["message", "error"])
            .unwrap_or_else(|| FAILURE_MESSAGE.to_string());

        warn!(status = %reply.status, "Email verification rejected: {message}");

        return Err(ProxyError::Upstream {
            status: reply.status,
            message,
        });
    }

    let message = reply
        .text_field(&["message"])
        .unwrap_or_else(|| SUCCESS_MESSAGE.to_string());

    Ok((
        StatusCode::OK,
        Json(VerifyEmailResponse {
            success: true,
            message,
        }),
    )
        .into_response())
}
