//! `aadgraph dump`

use aadgraph_common::StoredToken;
use aadgraph_common::token::{read_token_from, token_path};
use chrono::{DateTime, Utc};
use clap::Args;
use std::fs;
use std::path::Path;

use crate::commands::run_cli_async;
use crate::common::{abbreviate, format_key_values};
use crate::session::NOT_LOGGED_IN;

/// Arguments for `dump`.
#[derive(Args, Debug, Clone, Copy)]
pub struct DumpArgs {
    /// Print the raw token file instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Print the stored session.
pub async fn run(args: DumpArgs) -> i32 {
    run_cli_async(|| async move { dump(&token_path(), args.json) }).await
}

fn dump(path: &Path, raw: bool) -> Result<(), String> {
    if raw {
        if !path.exists() {
            return Err(NOT_LOGGED_IN.to_string());
        }
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read token file: {e}"))?;
        println!("{}", contents.trim_end());
        return Ok(());
    }

    let token = read_token_from(path)?.ok_or_else(|| NOT_LOGGED_IN.to_string())?;
    println!("{}\n", render(&token, path, Utc::now()));
    Ok(())
}

fn render(token: &StoredToken, path: &Path, now: DateTime<Utc>) -> String {
    let unknown = || "-".to_string();
    let expires = token.expires_at().map_or_else(unknown, |expiry| {
        let suffix = if expiry <= now { " (expired)" } else { "" };
        format!("{}{suffix}", expiry.format("%Y-%m-%d %H:%M:%S UTC"))
    });
    let rows = [
        ("Token file", path.display().to_string()),
        (
            "User",
            token.user_principal_name.clone().unwrap_or_else(unknown),
        ),
        ("User id", token.user_id.clone().unwrap_or_else(unknown)),
        ("Tenant id", token.tenant_id.clone().unwrap_or_else(unknown)),
        ("Resource", token.resource.clone().unwrap_or_else(unknown)),
        ("Token type", token.token_type.clone()),
        ("Expires", expires),
        ("Access token", abbreviate(&token.access_token)),
        (
            "Refresh token",
            token
                .refresh_token
                .as_deref()
                .map_or_else(unknown, abbreviate),
        ),
    ];
    format_key_values(&rows)
}
