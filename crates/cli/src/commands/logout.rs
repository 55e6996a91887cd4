//! `aadgraph logout`

use aadgraph_common::token::{remove_token_at, token_path};
use std::path::Path;
use tracing::debug;

use crate::commands::run_cli_async;

/// Remove the stored token.
pub async fn run() -> i32 {
    run_cli_async(|| async { logout(&token_path()).map(|_| ()) }).await
}

/// Remove the token at `path`. Returns whether a token was removed.
pub fn logout(path: &Path) -> Result<bool, String> {
    debug!(path = %path.display(), "Removing token file.");
    let removed = remove_token_at(path)?;
    if removed {
        println!("✅ Signed out\n");
    } else {
        println!("⚠️  Not logged in\n");
    }
    Ok(removed)
}
