//! `aadgraph login`

use aadgraph_common::{Config, write_token};
use clap::Args;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::callback;
use crate::commands::run_cli_async;
use crate::common::{format_elapsed_ms, spinner};
use crate::oauth::{OAuthClient, generate_state, verify_callback};

/// Arguments for `login`.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Application (client) id; defaults to AADGRAPH_CLIENT_ID
    #[arg(long = "appId", value_name = "APP_ID")]
    pub app_id: Option<String>,
    /// Redirect URI served locally; defaults to AADGRAPH_REDIRECT_URI
    #[arg(long = "redirectUri", value_name = "URI")]
    pub redirect_uri: Option<String>,
}

/// Sign in through the browser and store the token.
pub async fn run(args: LoginArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: LoginArgs) -> Result<(), String> {
    let config = Config::load()?;
    let client_id = match args.app_id {
        Some(app_id) => app_id,
        None => config.require_client_id()?.to_string(),
    };
    let redirect_uri = args
        .redirect_uri
        .unwrap_or_else(|| config.redirect_uri.clone());
    let redirect_url =
        Url::parse(&redirect_uri).map_err(|e| format!("Invalid redirect URI {redirect_uri}: {e}"))?;

    let oauth = OAuthClient::new(&config, client_id)?.with_redirect_uri(redirect_uri);
    let state = generate_state();
    let authorize_url = oauth.authorize_url(&state)?;

    let listener = callback::bind(&redirect_url).await?;
    debug!(redirect_uri = %redirect_url, "Callback server listening.");

    open_in_browser(authorize_url.as_str(), webbrowser::open);
    let wait_spinner = spinner("Waiting for sign-in...");
    let params = callback::wait_for_callback(listener, redirect_url.path()).await;
    wait_spinner.finish_and_clear();
    let code = verify_callback(&params?, &state)?;

    let start_time = Instant::now();
    let exchange_spinner = spinner("Exchanging authorization code...");
    let token = oauth.exchange_code(&code).await;
    exchange_spinner.finish_and_clear();
    let token = token?;

    let path = write_token(&token)?;
    debug!(path = %path.display(), "Stored token.");
    println!(
        "✅ Signed in as {} in {}\n",
        token
            .user_principal_name
            .as_deref()
            .unwrap_or("unknown user"),
        format_elapsed_ms(start_time)
    );
    Ok(())
}

/// Try `open` on `url`; print the URL for the user when it fails.
fn open_in_browser<F>(url: &str, open: F) -> bool
where
    F: FnOnce(&str) -> std::io::Result<()>,
{
    match open(url) {
        Ok(()) => {
            println!("Opened a browser to sign in. If nothing appeared, open:\n\n  {url}\n");
            true
        }
        Err(err) => {
            warn!(error = %err, "Failed to open a browser.");
            println!("Open this URL in a browser to sign in:\n\n  {url}\n");
            false
        }
    }
}
