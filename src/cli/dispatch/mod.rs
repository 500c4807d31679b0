use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let trains_url = matches
        .get_one::<String>("trains-url")
        .cloned()
        .context("missing required argument: --trains-url")?;
    let session_cookie = matches
        .get_one::<String>("session-cookie")
        .cloned()
        .context("missing required argument: --session-cookie")?;

    Ok(Action::Server(Args {
        port,
        dsn: SecretString::from(dsn),
        trains_url,
        session_cookie,
    }))
}
