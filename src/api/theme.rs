//! Shared UI theme for pages rendered by the gateway and the front-end.

use axum::{
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use std::fmt::Write as _;

/// One CSS rule: a selector and its declarations.
#[derive(Debug, Clone, Copy)]
pub struct StyleRule {
    pub selector: &'static str,
    pub declarations: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Class applied to the element wrapping themed content.
    pub root_class: &'static str,
    pub overrides: &'static [StyleRule],
}

/// Component-library defaults with the required-field asterisk hidden.
pub const THEME: Theme = Theme {
    root_class: "portico-theme",
    overrides: &[StyleRule {
        selector: ".MuiFormLabel-asterisk, .MuiInputLabel-asterisk",
        declarations: &[("display", "none")],
    }],
};

impl Theme {
    #[must_use]
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();
        for rule in self.overrides {
            let _ = write!(css, "{} {{", rule.selector);
            for (property, value) in rule.declarations {
                let _ = write!(css, " {property}: {value};");
            }
            css.push_str(" }\n");
        }
        css
    }

    /// Wrap an HTML fragment in a document carrying this theme.
    #[must_use]
    pub fn provide(&self, title: &str, content: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>\n{css}</style>\n</head>\n\
             <body>\n<div class=\"{root}\">\n{content}\n</div>\n</body>\n</html>\n",
            css = self.stylesheet(),
            root = self.root_class,
        )
    }
}

// axum handler serving the theme overrides
pub async fn stylesheet() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/css; charset=utf-8"),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        THEME.stylesheet(),
    )
}
