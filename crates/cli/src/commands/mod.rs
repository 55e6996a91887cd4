//! One module per CLI command. Each exposes `run(args) -> i32`.

pub mod authz_uris;
pub mod dump;
pub mod export;
pub mod healthcheck;
pub mod login;
pub mod logout;

/// Run a command body, printing its error and mapping the outcome to an exit code.
pub async fn run_cli_async<F, Fut>(f: F) -> i32
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    match f().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
