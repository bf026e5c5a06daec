use crate::api;
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_url: Url,
    pub frontend_dir: Option<PathBuf>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the backend client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let backend = api::backend::Backend::new(args.api_url)?;

    api::new(args.port, backend, args.frontend_dir).await
}
