use super::handlers::{form_status, health, me, register, verify_email};
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` spec.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(me::get_me))
        .routes(routes!(register::register))
        .routes(routes!(verify_email::verify_email))
        .routes(routes!(form_status::notify));

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Session lookup, registration and email verification".to_string());

    let mut form_tag = Tag::new("form-status");
    form_tag.description = Some("Form status notifications".to_string());

    router.get_openapi_mut().tags = Some(vec![auth_tag, form_tag]);

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = Some(License::new(env!("CARGO_PKG_LICENSE")));

    OpenApiBuilder::new().info(info).build()
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `:` separated and may include "Name <email>".
    let primary = env!("CARGO_PKG_AUTHORS").split(':').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let mut contact = Contact::new();
    match primary.split_once('<') {
        Some((name, email)) => {
            contact.name = Some(name.trim().to_string());
            contact.email = Some(email.trim_end_matches('>').trim().to_string());
        }
        None => contact.name = Some(primary.to_string()),
    }

    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_proxy_route() {
        let doc = openapi();
        for path in [
            "/health",
            "/api/me",
            "/api/register",
            "/api/verify-email",
            "/api/form-status/notify",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn info_comes_from_cargo_metadata() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
        let contact = doc.info.contact.and_then(|c| c.email);
        assert_eq!(contact.as_deref(), Some("team@portico.dev"));
    }
}
