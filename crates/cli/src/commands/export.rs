//! `aadgraph export --appId <id>`

use aadgraph_sdk::GraphClient;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::apps::find_application;
use crate::commands::run_cli_async;
use crate::common::{format_elapsed_ms, spinner};
use crate::session::Session;

/// Arguments for `export`.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Application (client) id of the app registration
    #[arg(long = "appId", value_name = "APP_ID")]
    pub app_id: String,
    /// Write the JSON to this file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Export an application registration.
pub async fn run(args: ExportArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: ExportArgs) -> Result<(), String> {
    let session = Session::load()?;

    let start_time = Instant::now();
    let fetch_spinner = spinner("Fetching application...");
    let result = export_application(&session.client, &args.app_id).await;
    fetch_spinner.finish_and_clear();
    let json = result?;

    match args.output {
        Some(path) => {
            write_export(&path, &json)?;
            println!(
                "✅ Exported {} to {} in {}\n",
                args.app_id,
                path.display(),
                format_elapsed_ms(start_time)
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Pretty-printed JSON of the application whose `appId` matches.
pub async fn export_application(client: &GraphClient, app_id: &str) -> Result<String, String> {
    let application = find_application(client, app_id)
        .await?
        .ok_or_else(|| format!("No application found with appId '{app_id}'"))?;
    serde_json::to_string_pretty(&application)
        .map_err(|e| format!("Failed to serialize application: {e}"))
}

/// Write exported JSON to `path`, creating parent directories.
pub fn write_export(path: &Path, json: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }
    fs::write(path, format!("{json}\n"))
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
