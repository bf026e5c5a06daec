//! Helpers shared by the API unit tests.

use crate::api::backend::Backend;
use anyhow::Result;
use axum::{body::to_bytes, response::Response};
use serde_json::Value;
use std::{net::TcpListener, sync::Arc};
use url::Url;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// URL of a local port that was just released, so connections are refused.
pub fn unreachable_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}"))
}

pub fn backend(url: &str) -> Result<Arc<Backend>> {
    Ok(Arc::new(Backend::new(Url::parse(url)?)?))
}

pub async fn json_body(response: Response) -> Result<Value> {
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}
