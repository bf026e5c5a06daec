//! Setup gate for front-end navigations.
//!
//! Rules are data: a path predicate, the backend endpoint reporting whether
//! initial setup is still pending, and where to send the browser once it is
//! not. Any failure to obtain a definitive answer lets the request through.

use crate::api::{backend::Backend, error::ProxyError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRule {
    pub path: &'static str,
    pub setup_check: &'static str,
    pub redirect_to: &'static str,
}

impl GateRule {
    /// Registration is only reachable while the backend still needs its first account.
    pub const REGISTER: Self = Self {
        path: "/register",
        setup_check: "/api/auth/check-initial-setup",
        redirect_to: "/login",
    };

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        path == self.path
    }
}

#[derive(Debug, Clone)]
pub struct Gate {
    backend: Arc<Backend>,
    rules: Arc<[GateRule]>,
}

impl Gate {
    #[must_use]
    pub fn new(backend: Arc<Backend>, rules: Vec<GateRule>) -> Self {
        Self {
            backend,
            rules: rules.into(),
        }
    }

    fn rule_for(&self, path: &str) -> Option<GateRule> {
        self.rules.iter().find(|rule| rule.matches(path)).copied()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetupState {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    needs_initial_setup: Option<bool>,
}

impl SetupState {
    const fn is_complete(&self) -> bool {
        self.success && matches!(self.needs_initial_setup, Some(false))
    }
}

async fn setup_complete(backend: &Backend, rule: &GateRule) -> Result<bool, ProxyError> {
    let reply = backend.send(backend.get(rule.setup_check)).await?;

    if !reply.is_success() {
        return Err(ProxyError::Upstream {
            status: reply.status,
            message: reply.text_field(&["message", "error"]).unwrap_or_default(),
        });
    }

    let state: SetupState = reply.json()?;

    Ok(state.is_complete())
}

/// Middleware applying the gate rules to every request.
pub async fn guard(State(gate): State<Gate>, request: Request, next: Next) -> Response {
    let Some(rule) = gate.rule_for(request.uri().path()) else {
        return next.run(request).await;
    };

    match setup_complete(&gate.backend, &rule).await {
        Ok(true) => {
            info!("Initial setup complete, redirecting {} to {}", rule.path, rule.redirect_to);
            Redirect::temporary(rule.redirect_to).into_response()
        }
        Ok(false) => {
            debug!("Initial setup pending, allowing {}", rule.path);
            next.run(request).await
        }
        Err(err) => {
            warn!("Setup check failed, allowing {}: {err}", rule.path);
            next.run(request).await
        }
    }
}
