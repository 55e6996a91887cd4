//! Local HTTP server that receives the OAuth redirect.

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};
use tracing::debug;
use url::Url;

const SIGNED_IN_PAGE: &str =
    "<html><body><h3>aadgraph: sign-in complete.</h3><p>You can close this window.</p></body></html>";

/// Query parameters delivered to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    /// Authorization code
    pub code: Option<String>,
    /// Echoed `state` nonce
    pub state: Option<String>,
    /// Error code when sign-in failed
    pub error: Option<String>,
    /// Human-readable error
    pub error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CallbackState {
    sender: Arc<Mutex<Option<oneshot::Sender<CallbackParams>>>>,
}

/// Bind the host and port named by the redirect URI.
pub async fn bind(redirect_uri: &Url) -> Result<TcpListener, String> {
    let host = redirect_uri
        .host_str()
        .ok_or_else(|| format!("Redirect URI {redirect_uri} has no host"))?;
    let port = redirect_uri
        .port_or_known_default()
        .ok_or_else(|| format!("Redirect URI {redirect_uri} has no port"))?;
    TcpListener::bind((host, port))
        .await
        .map_err(|e| format!("Failed to listen on {host}:{port}: {e}"))
}

/// Serve `path` on `listener` until the first callback arrives, then shut
/// the server down and return the callback's parameters.
pub async fn wait_for_callback(
    listener: TcpListener,
    path: &str,
) -> Result<CallbackParams, String> {
    let (callback_tx, callback_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let state = CallbackState {
        sender: Arc::new(Mutex::new(Some(callback_tx))),
    };
    let app = Router::new()
        .route(path, get(callback))
        .with_state(state);

    if let Ok(addr) = listener.local_addr() {
        debug!(%addr, path, "Waiting for OAuth callback.");
    }

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
                debug!("Callback received, shutting down callback server.");
            })
            .await
    });

    let received = callback_rx.await;
    let _ = shutdown_tx.send(());

    server
        .await
        .map_err(|e| format!("Callback server task failed: {e}"))?
        .map_err(|e| format!("Callback server error: {e}"))?;

    received.map_err(|_| "Callback server stopped before a callback arrived".to_string())
}

async fn callback(
    State(state): State<CallbackState>,
    Query(params): Query<CallbackParams>,
) -> Html<&'static str> {
    if let Some(sender) = state.sender.lock().await.take() {
        let _ = sender.send(params);
    }
    Html(SIGNED_IN_PAGE)
}
