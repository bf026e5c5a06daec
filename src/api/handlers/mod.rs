//! Route handlers.
//!
//! Each proxy handler validates its input, makes exactly one backend call via
//! [`Backend`](crate::api::backend::Backend) and translates the reply.

pub mod form_status;
pub mod health;
pub mod me;
pub mod register;
pub mod root;
pub mod verify_email;

use crate::api::error::ProxyError;
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// A field counts as present when it is a non-empty string.
fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Decode an inbound body; an empty body decodes as `T::default()`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ProxyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    Ok(serde_json::from_slice(body)?)
}
