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
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

const BACKEND_PATH: &str = "/api/users/register";
const MISSING_FIELDS_MESSAGE: &str = "Username, email and password are required";
const FAILURE_MESSAGE: &str = "Registration failed";
const SUCCESS_MESSAGE: &str = "User registered successfully";

#[derive(ToSchema, Serialize, Deserialize, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl RegisterRequest {
    fn is_complete(&self) -> bool {
        present(self.username.as_deref())
            && present(self.email.as_deref())
            && present(self.password.as_deref())
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    success: bool,
    message: String,
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses (
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Username, email or password missing", body = RegisterResponse),
        (status = 500, description = "Backend unreachable or malformed payload", body = RegisterResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn register(backend: Extension<Arc<Backend>>, body: Bytes) -> Response {
    match forward(&backend, &body).await {
        Ok(response) => response,
        Err(err) => err.into_response_with(Envelope::Message),
    }
}

async fn forward(backend: &Backend, body: &Bytes) -> Result<Response, ProxyError> {
    let request: RegisterRequest = parse_body(body)?;

    if !request.is_complete() {
        return Err(ProxyError::MissingFields(MISSING_FIELDS_MESSAGE));
    }

    let reply = backend
        .send(backend.post(BACKEND_PATH).json(&request))
        .await?;

    if !reply.is_success() {
        let message = reply
            .text_field(&["message", "error"])
            .unwrap_or_else(|| FAILURE_MESSAGE.to_string());

        warn!(status = %reply.status, "Registration rejected: {message}");

        return Err(ProxyError::Upstream {
            status: reply.status,
            message,
        });
    }

    info!(username = ?request.username, "User registered");

    let status = if reply.status == StatusCode::CREATED {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let message = reply
        .text_field(&["message"])
        .unwrap_or_else(|| SUCCESS_MESSAGE.to_string());

    Ok((
        status,
        Json(RegisterResponse {
            success: true,
            message,
        }),
    )
        .into_response())
}
