use axum::response::IntoResponse;

// axum handler for the service banner, used when no front-end is served
pub async fn root() -> impl IntoResponse {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
