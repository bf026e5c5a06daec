use crate::api::{
    backend::Backend,
    error::{Envelope, ProxyError},
};
use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, warn};

const BACKEND_PATH: &str = "/api/form-status/notify";
const FAILURE_MESSAGE: &str = "Failed to notify form status";

#[utoipa::path(
    post,
    path = "/api/form-status/notify",
    request_body(
        content = String,
        content_type = "application/json",
        description = "Any JSON document, forwarded byte for byte."
    ),
    responses (
        (status = 200, description = "Backend reply relayed unchanged."),
        (status = 500, description = "Backend unreachable, or the payload is empty or not JSON."),
    ),
    tag = "form-status"
)]
#[instrument(skip_all)]
pub async fn notify(backend: Extension<Arc<Backend>>, body: Bytes) -> Response {
    match forward(&backend, &body).await {
        Ok(response) => response,
        Err(err) => err.into_response_with(Envelope::Message),
    }
}

async fn forward(backend: &Backend, body: &Bytes) -> Result<Response, ProxyError> {
    // Validated only; the backend receives the original bytes.
    serde_json::from_slice::<Value>(body)?;

    let reply = backend
        .send(
            backend
                .post(BACKEND_PATH)
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone()),
        )
        .await?;

    if !reply.is_success() {
        let message = reply
            .text_field(&["message", "error"])
            .unwrap_or_else(|| FAILURE_MESSAGE.to_string());

        warn!(status = %reply.status, "Form status notification rejected: {message}");

        return Err(ProxyError::Upstream {
            status: reply.status,
            message,
        });
    }

    let relayed: Value = reply.json()?;

    Ok((reply.status, Json(relayed)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::INTERNAL_ERROR_MESSAGE;
    use crate::api::test_support::{backend, can_bind_localhost, json_body, unreachable_url};
    use anyhow::Result;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(backend: Arc<Backend>) -> Router {
        Router::new()
            .route("/api/form-status/notify", post(notify))
            .layer(Extension(backend))
    }

    fn request(body: &str) -> Result<Request<Body>> {
        Ok(Request::builder()
            .method("POST")
            .uri("/api/form-status/notify")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?)
    }

    #[tokio::test]
    async fn forwards_body_unmodified() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        // Key order and spacing must survive the hop.
        let payload = r#"{"z": 1, "formId": 12, "closed": true, "message": {"es": "Cerrado"}}"#;
        Mock::given(method("POST"))
            .and(path(BACKEND_PATH))
            .and(header("content-type", "application/json"))
            .and(body_string(payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let response = app(backend(&server.uri())?)
            .oneshot(request(payload)?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await?, json!({"success": true}));
        Ok(())
    }

    #[tokio::test]
    async fn backend_error_is_relayed() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BACKEND_PATH))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"message": "Unknown form"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = app(backend(&server.uri())?)
            .oneshot(request(r#"{"formId": 99}"#)?)
            .await?;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await?,
            json!({"success": false, "message": "Unknown form"})
        );
        Ok(())
    }

    #[tokio::test]
    async fn backend_error_without_message_uses_fallback() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BACKEND_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let response = app(backend(&server.uri())?)
            .oneshot(request(r#"{"formId": 1}"#)?)
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await?,
            json!({"success": false, "message": FAILURE_MESSAGE})
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_internal_error() -> Result<()> {
        let response = app(backend(&unreachable_url()?)?)
            .oneshot(request(r#"{"formId": 1}"#)?)
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await?,
            json!({"success": false, "message": INTERNAL_ERROR_MESSAGE})
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_request_is_not_forwarded() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = app(backend(&server.uri())?)
            .oneshot(request("{broken")?)
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }

    #[tokio::test]
    async fn empty_request_is_not_forwarded() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(0)
            .mount(&server)
            .await;

        let response = app(backend(&server.uri())?)
            .oneshot(request("")?)
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await?,
            json!({"success": false, "message": INTERNAL_ERROR_MESSAGE})
        );
        Ok(())
    }
}
