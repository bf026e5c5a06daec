use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_FRONTEND_DIR: &str = "frontend-dir";

/// Backend base URL used when `NEXT_PUBLIC_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug)]
pub struct Options {
    pub api_url: Url,
    pub frontend_dir: Option<PathBuf>,
}

impl Options {
    /// Read backend options from validated matches.
    ///
    /// # Errors
    /// Returns an error if the API URL is not an absolute http(s) URL.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let raw = matches
            .get_one::<String>(ARG_API_URL)
            .map_or(DEFAULT_API_URL, String::as_str);

        let api_url = Url::parse(raw).with_context(|| format!("invalid API URL: {raw}"))?;

        if !matches!(api_url.scheme(), "http" | "https") {
            anyhow::bail!("unsupported API URL scheme: {}", api_url.scheme());
        }

        Ok(Self {
            api_url,
            frontend_dir: matches.get_one::<PathBuf>(ARG_FRONTEND_DIR).cloned(),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Backend base URL")
                .env("NEXT_PUBLIC_API_URL")
                .default_value(DEFAULT_API_URL),
        )
        .arg(
            Arg::new(ARG_FRONTEND_DIR)
                .long(ARG_FRONTEND_DIR)
                .help("Directory with the built front-end, served for unmatched paths")
                .env("PORTICO_FRONTEND_DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}
