//! Command-line argument dispatch.
//!
//! Maps validated CLI arguments to the action the binary executes.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_PORT, backend};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if the backend URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let backend_opts = backend::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        api_url: backend_opts.api_url,
        frontend_dir: backend_opts.frontend_dir,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_server_action_from_env() {
        temp_env::with_vars(
            [
                ("PORTICO_PORT", Some("9000")),
                ("NEXT_PUBLIC_API_URL", Some("http://backend:4000")),
                ("PORTICO_FRONTEND_DIR", None::<&str>),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["portico"]);
                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(args.port, 9000);
                    assert_eq!(args.api_url.as_str(), "http://backend:4000/");
                    assert!(args.frontend_dir.is_none());
                }
            },
        );
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        temp_env::with_vars([("NEXT_PUBLIC_API_URL", Some("not a url"))], || {
            let matches = crate::cli::commands::new().get_matches_from(vec!["portico"]);
            let result = handler(&matches);
            assert!(result.is_err());
            if let Err(err) = result {
                assert!(err.to_string().contains("invalid API URL"));
            }
        });
    }
}
