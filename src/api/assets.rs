//! Development helper for clearing the closed-form state in the browser.
//!
//! The front-end stores the closed-form flag and its message in
//! `sessionStorage`. The script served here removes both and reloads the
//! page. It only defines `resetFormState`; nothing runs until it is called,
//! so the reload cannot loop.

use crate::api::theme::THEME;
use axum::{
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{Html, IntoResponse},
};

pub const FORM_CLOSED_KEY: &str = "formClosed";
pub const CLOSED_FORM_MESSAGE_KEY: &str = "closedFormMessage";

pub const RESET_SCRIPT_PATH: &str = "/assets/reset-form-state.js";

#[must_use]
pub fn reset_script() -> String {
    format!(
        r#"(function () {{
  if (typeof window === "undefined") {{
    return;
  }}
  window.resetFormState = function () {{
    window.sessionStorage.removeItem("{FORM_CLOSED_KEY}");
    window.sessionStorage.removeItem("{CLOSED_FORM_MESSAGE_KEY}");
    window.location.reload();
  }};
}})();
"#
    )
}

// axum handler serving the reset script
pub async fn reset_form_state_js() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (CACHE_CONTROL, "no-store"),
        ],
        reset_script(),
    )
}

// axum handler for the manual reset page
pub async fn reset_page() -> impl IntoResponse {
    let content = format!(
        "<p>Clears the closed-form state stored in this browser session.</p>\n\
         <button type=\"button\" onclick=\"resetFormState()\">Reset form state</button>\n\
         <script src=\"{RESET_SCRIPT_PATH}\"></script>"
    );

    (
        [(CACHE_CONTROL, "no-store")],
        Html(THEME.provide("Reset form state", &content)),
    )
}
