//! Command line interface for the Azure AD Graph client.
//!
//! The `aadgraph` binary is a thin wrapper around [`run_cli`]. Commands that
//! talk to Graph read the token written by `aadgraph login` when they start.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub mod apps;
pub mod callback;
pub mod commands;
mod common;
pub mod oauth;
pub mod session;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "AADGRAPH_LOG";

/// Target prefix shared by every crate in the workspace.
const LOG_TARGET: &str = "aadgraph";

#[derive(Parser)]
#[command(
    name = "aadgraph",
    version,
    about = "\x1b[36maadgraph\x1b[0m signs in to Azure AD and inspects app registrations"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 🔑 Sign in and store an access token
    Login(commands::login::LoginArgs),
    /// 🚪 Remove the stored access token
    Logout,
    /// 📋 Show the stored session
    Dump(commands::dump::DumpArgs),
    /// 📦 Export an application registration as JSON
    Export(commands::export::ExportArgs),
    /// 🩺 Check an application registration for common problems
    Healthcheck(commands::healthcheck::HealthcheckArgs),
    /// 🔗 Print sign-in and admin-consent URIs for an application
    #[command(name = "authZUris")]
    AuthzUris(commands::authz_uris::AuthzUrisArgs),
}

/// Parse `args` (program name first) and run the command on a fresh runtime.
pub fn run_cli(args: Vec<String>) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            return 1;
        }
    };

    runtime.block_on(run_cli_async(args))
}

/// Parse `args` and run the command. Returns the process exit code.
pub async fn run_cli_async(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Login(args)) => commands::login::run(args).await,
            Some(Commands::Logout) => commands::logout::run().await,
            Some(Commands::Dump(args)) => commands::dump::run(args).await,
            Some(Commands::Export(args)) => commands::export::run(args).await,
            Some(Commands::Healthcheck(args)) => commands::healthcheck::run(args).await,
            Some(Commands::AuthzUris(args)) => commands::authz_uris::run(args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Install the stderr fmt subscriber.
pub fn init_tracing() {
    let filter = filter_spec(std::env::var(LOG_ENV_VAR).ok());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

// AADGRAPH_LOG is either a plain level ("debug"), applied to the workspace
// crates, or a full filter spec like "aadgraph_sdk=trace,reqwest=debug".
fn filter_spec(value: Option<String>) -> String {
    match value {
        Some(level) if is_plain_level(&level) => format!("{LOG_TARGET}={level}"),
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => format!("{LOG_TARGET}=info"),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_spec() {
        assert_eq!(filter_spec(None), "aadgraph=info");
        assert_eq!(filter_spec(Some("DEBUG".to_string())), "aadgraph=DEBUG");
        assert_eq!(
            filter_spec(Some("aadgraph_sdk=trace".to_string())),
            "aadgraph_sdk=trace"
        );
        assert_eq!(filter_spec(Some(" ".to_string())), "aadgraph=info");
    }

    #[test]
    fn test_command_names() {
        let cli = Cli::try_parse_from(["aadgraph", "authZUris", "--appId", "a1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::AuthzUris(_))));

        let cli = Cli::try_parse_from(["aadgraph", "export", "--appId", "a1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Export(_))));

        assert!(Cli::try_parse_from(["aadgraph", "healthcheck"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[tokio::test]
    async fn test_parse_error_exit_code() {
        let code = run_cli_async(vec!["aadgraph".to_string(), "bogus".to_string()]).await;
        assert_eq!(code, 2);
    }
}
