//! # Portico (front-end gateway)
//!
//! `portico` sits between the browser application and the backend system of
//! record. Every API route translates one inbound request into exactly one
//! outbound backend call and relays the result.
//!
//! ## Routes
//!
//! - `POST /api/form-status/notify` relays an arbitrary JSON body.
//! - `GET /api/me` forwards the `token` cookie as a bearer token.
//! - `POST /api/register` and `POST /api/verify-email` presence-check their
//!   payloads before forwarding.
//!
//! ## Setup gate
//!
//! Navigations to `/register` are redirected to `/login` once the backend
//! reports that initial setup is complete. The check fails open: if the
//! backend cannot answer, the request proceeds.
//!
//! ## Assets
//!
//! The gateway also serves the theme stylesheet and the development script
//! that clears the closed-form state from `sessionStorage`.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
