//! `aadgraph authZUris [--appId <id>] [--redirectUri <uri>]`

use aadgraph_common::Config;
use clap::Args;
use console::style;

use crate::commands::run_cli_async;
use crate::oauth::{OAuthClient, generate_state};

/// Arguments for `authZUris`.
#[derive(Args, Debug, Clone)]
pub struct AuthzUrisArgs {
    /// Application (client) id; defaults to AADGRAPH_CLIENT_ID
    #[arg(long = "appId", value_name = "APP_ID")]
    pub app_id: Option<String>,
    /// Redirect URI; defaults to AADGRAPH_REDIRECT_URI
    #[arg(long = "redirectUri", value_name = "URI")]
    pub redirect_uri: Option<String>,
}

/// Print the sign-in and admin-consent URIs.
pub async fn run(args: AuthzUrisArgs) -> i32 {
    run_cli_async(|| async move {
        let config = Config::load()?;
        println!("{}", authz_uris(&config, &args)?);
        Ok(())
    })
    .await
}

/// Render both URIs for `args`, filling gaps from `config`.
pub fn authz_uris(config: &Config, args: &AuthzUrisArgs) -> Result<String, String> {
    let client_id = match &args.app_id {
        Some(app_id) => app_id.as_str(),
        None => config.require_client_id()?,
    };
    let mut client = OAuthClient::new(config, client_id)?;
    if let Some(redirect_uri) = &args.redirect_uri {
        client = client.with_redirect_uri(redirect_uri.clone());
    }

    let state = generate_state();
    let sign_in = client.authorize_url(&state)?;
    let consent = client.admin_consent_url(&state)?;
    Ok(format!(
        "{}\n  {sign_in}\n\n{}\n  {consent}\n",
        style("User sign-in").bold(),
        style("Admin consent").bold()
    ))
}
