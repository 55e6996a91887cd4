//! CLI configuration.
//!
//! Values come from the process environment, then a `.env` file in the
//! current directory, then built-in defaults.

use std::path::Path;
use tracing::debug;

use crate::dotenv::DotenvFile;

/// Azure AD application (client) id
pub const CLIENT_ID_VAR: &str = "AADGRAPH_CLIENT_ID";
/// Client secret for confidential clients
pub const CLIENT_SECRET_VAR: &str = "AADGRAPH_CLIENT_SECRET";
/// Tenant used for sign-in
pub const TENANT_VAR: &str = "AADGRAPH_TENANT";
/// Login authority host
pub const AUTHORITY_VAR: &str = "AADGRAPH_AUTHORITY";
/// Graph base URL
pub const GRAPH_URL_VAR: &str = "AADGRAPH_GRAPH_URL";
/// Graph `api-version`
pub const API_VERSION_VAR: &str = "AADGRAPH_API_VERSION";
/// OAuth redirect URI served by `login`
pub const REDIRECT_URI_VAR: &str = "AADGRAPH_REDIRECT_URI";

const DEFAULT_TENANT: &str = "common";
const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
const DEFAULT_GRAPH_URL: &str = "https://graph.windows.net";
const DEFAULT_API_VERSION: &str = "1.6";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";

const DOTENV_FILENAME: &str = ".env";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application (client) id
    pub client_id: Option<String>,
    /// Client secret, if the app is a confidential client
    pub client_secret: Option<String>,
    /// Tenant used for sign-in
    pub tenant: String,
    /// Login authority host
    pub authority: String,
    /// Graph base URL
    pub graph_url: String,
    /// Graph `api-version`
    pub api_version: String,
    /// OAuth redirect URI
    pub redirect_uri: String,
}

impl Config {
    /// Load from the environment and `./.env`.
    pub fn load() -> Result<Self, String> {
        let cwd = std::env::current_dir()
            .map_err(|err| format!("Failed to determine current directory: {err}"))?;
        Self::load_from(&cwd.join(DOTENV_FILENAME), |key| std::env::var(key).ok())
    }

    /// Load from `env` and the dotenv file at `dotenv_path`.
    ///
    /// A variable set to a blank value in `env` falls through to the file.
    pub fn load_from<F>(dotenv_path: &Path, env: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dotenv = DotenvFile::read(dotenv_path)?;
        debug!(
            path = %dotenv.path().display(),
            vars = dotenv.get_vars().len(),
            "Loaded dotenv file."
        );
        Ok(Self::from_lookup(|key| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| dotenv.get(key).map(str::to_string))
        }))
    }

    /// Build from a key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            client_id: get(CLIENT_ID_VAR),
            client_secret: get(CLIENT_SECRET_VAR),
            tenant: get_or(TENANT_VAR, DEFAULT_TENANT),
            authority: get_or(AUTHORITY_VAR, DEFAULT_AUTHORITY)
                .trim_end_matches('/')
                .to_string(),
            graph_url: get_or(GRAPH_URL_VAR, DEFAULT_GRAPH_URL),
            api_version: get_or(API_VERSION_VAR, DEFAULT_API_VERSION),
            redirect_uri: get_or(REDIRECT_URI_VAR, DEFAULT_REDIRECT_URI),
        }
    }

    /// Client id, or an error telling the user which variable to set.
    pub fn require_client_id(&self) -> Result<&str, String> {
        self.client_id.as_deref().ok_or_else(|| {
            format!("Missing client id: set {CLIENT_ID_VAR} in the environment or .env")
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.client_id, None);
        assert_eq!(config.tenant, "common");
        assert_eq!(config.authority, "https://login.microsoftonline.com");
        assert_eq!(config.graph_url, "https://graph.windows.net");
        assert_eq!(config.api_version, "1.6");
        assert_eq!(config.redirect_uri, "http://localhost:3000/callback");
        assert!(config.require_client_id().unwrap_err().contains(CLIENT_ID_VAR));
    }

    #[test]
    fn test_lookup_overrides_and_blank_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (CLIENT_ID_VAR, "app-1"),
            (TENANT_VAR, "contoso.com"),
            (AUTHORITY_VAR, "https://login.example.com/"),
            (API_VERSION_VAR, "  "),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()));
        assert_eq!(config.require_client_id().unwrap(), "app-1");
        assert_eq!(config.tenant, "contoso.com");
        assert_eq!(config.authority, "https://login.example.com");
        assert_eq!(config.api_version, "1.6");
    }

    fn write_dotenv(temp_dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = temp_dir.path().join(".env");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_env_takes_precedence_over_dotenv() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dotenv(
            &temp_dir,
            "AADGRAPH_TENANT=from-dotenv\nAADGRAPH_REDIRECT_URI=http://localhost:4567/cb\n",
        );
        let env: HashMap<&str, &str> = HashMap::from([(TENANT_VAR, "from-env")]);

        let config = Config::load_from(&path, |key| env.get(key).map(|v| (*v).to_string())).unwrap();
        assert_eq!(config.tenant, "from-env");
        assert_eq!(config.redirect_uri, "http://localhost:4567/cb");
        assert_eq!(config.graph_url, "https://graph.windows.net");
    }

    #[test]
    fn test_blank_env_value_falls_through_to_dotenv() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dotenv(&temp_dir, "AADGRAPH_REDIRECT_URI=http://localhost:4567/cb\n");
        let env: HashMap<&str, &str> =
            HashMap::from([(REDIRECT_URI_VAR, ""), (API_VERSION_VAR, "  ")]);

        let config = Config::load_from(&path, |key| env.get(key).map(|v| (*v).to_string())).unwrap();
        assert_eq!(config.redirect_uri, "http://localhost:4567/cb");
        assert_eq!(config.api_version, "1.6");
    }

    #[test]
    fn test_missing_dotenv_uses_env_and_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let env: HashMap<&str, &str> = HashMap::from([(CLIENT_ID_VAR, "app-1")]);

        let config = Config::load_from(&temp_dir.path().join(".env"), |key| {
            env.get(key).map(|v| (*v).to_string())
        })
        .unwrap();
        assert_eq!(config.require_client_id().unwrap(), "app-1");
        assert_eq!(config.tenant, "common");
    }
}
