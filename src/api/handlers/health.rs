use crate::{GIT_COMMIT_HASH, api::backend::Backend};
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    backend: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Backend is reachable", body = [Health]),
        (status = 503, description = "Backend is unreachable", body = [Health])
    ),
    tag= "health"
)]
// axum handler for health
pub async fn health(method: Method, backend: Extension<Arc<Backend>>) -> impl IntoResponse {
    let reachable = backend.is_reachable().await;

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: if reachable {
            "ok".to_string()
        } else {
            "error".to_string()
        },
    };

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let headers = format!("{}:{}:{}", health.name, health.version, short_hash)
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            debug!("X-App header: {:?}", x_app_header_value);

            let mut headers = HeaderMap::new();

            headers.insert("X-App", x_app_header_value);

            headers
        })
        .map_err(|err| {
            error!("Failed to parse X-App header: {}", err);
        });

    // Unwrap the headers or provide a default value (empty headers) in case of an error
    let headers = headers.unwrap_or_else(|()| HeaderMap::new());

    if reachable {
        debug!("Backend is reachable");
        (StatusCode::OK, headers, body)
    } else {
        error!("Backend {} is unreachable", backend.base_url());
        (StatusCode::SERVICE_UNAVAILABLE, headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{backend, can_bind_localhost, json_body, unreachable_url};
    use anyhow::Result;
    use axum::{
        Router,
        body::to_bytes,
        http::Request,
        routing::get,
    };
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(backend: Arc<Backend>) -> Router {
        Router::new()
            .route("/health", get(health).options(health))
            .layer(Extension(backend))
    }

    #[tokio::test]
    async fn reachable_backend_is_healthy() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        // Any status counts as reachable.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = app(backend(&server.uri())?)
            .oneshot(Request::get("/health").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("X-App"));
        let body = json_body(response).await?;
        assert_eq!(body["backend"], "ok");
        assert_eq!(body["name"], env!("CARGO_PKG_NAME"));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() -> Result<()> {
        let response = app(backend(&unreachable_url()?)?)
            .oneshot(Request::get("/health").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await?["backend"], "error");
        Ok(())
    }

    #[tokio::test]
    async fn options_returns_headers_only() -> Result<()> {
        let response = app(backend(&unreachable_url()?)?)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/health")
                    .body(Body::empty())?,
            )
            .await?;

        assert!(response.headers().contains_key("X-App"));
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(body.is_empty());
        Ok(())
    }
}
