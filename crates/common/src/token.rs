//! Persisted OAuth token.
//!
//! The token lives in one JSON file at a fixed path in the OS temp directory.
//! It is read at command start, written on login and removed on logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Token filename inside the OS temp directory
const TOKEN_FILENAME: &str = "aadgraph-token.json";

/// Token exchange result plus the identity fields derived from it.
///
/// Fields not modelled here are kept in `extra` so the file round-trips
/// whatever the token endpoint returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredToken {
    /// Bearer token for Graph calls
    pub access_token: String,
    /// Token type, normally "Bearer"
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Refresh token, when issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Resource the token was issued for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Directory the user signed in to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Object id of the signed-in user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// UPN of the signed-in user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
    /// Remaining fields from the token response
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl StoredToken {
    /// Expiry from `expires_on` (epoch seconds, as a string or a number).
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let seconds = match self.extra.get("expires_on")? {
            serde_json::Value::String(text) => text.parse::<i64>().ok()?,
            serde_json::Value::Number(number) => number.as_i64()?,
            _ => return None,
        };
        DateTime::from_timestamp(seconds, 0)
    }

    /// Whether the token has expired at `now`. Unknown expiry counts as valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expiry| expiry <= now)
    }
}

/// Get the token file path (`<temp dir>/aadgraph-token.json`).
pub fn token_path() -> PathBuf {
    std::env::temp_dir().join(TOKEN_FILENAME)
}

/// Read the token file if it exists.
pub fn read_token() -> Result<Option<StoredToken>, String> {
    read_token_from(&token_path())
}

/// Read a token file at `path` if it exists.
pub fn read_token_from(path: &Path) -> Result<Option<StoredToken>, String> {
    if !path.exists() {
        debug!(path = %path.display(), "No token file found.");
        return Ok(None);
    }

    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read token file: {e}"))?;

    let token: StoredToken =
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse token file: {e}"))?;

    Ok(Some(token))
}

/// Write the token file.
pub fn write_token(token: &StoredToken) -> Result<PathBuf, String> {
    let path = token_path();
    write_token_to(&path, token)?;
    Ok(path)
}

/// Write a token file at `path`, readable by the current user only.
pub fn write_token_to(path: &Path, token: &StoredToken) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create token directory: {e}"))?;
    }

    let contents = serde_json::to_string_pretty(token)
        .map_err(|e| format!("Failed to serialize token: {e}"))?;

    fs::write(path, contents).map_err(|e| format!("Failed to write token file: {e}"))?;
    restrict_permissions(path)?;
    debug!(path = %path.display(), "Wrote token file.");
    Ok(())
}

/// Remove the token file. Returns whether a file was removed.
pub fn remove_token() -> Result<bool, String> {
    remove_token_at(&token_path())
}

/// Remove a token file at `path`. Returns whether a file was removed.
pub fn remove_token_at(path: &Path) -> Result<bool, String> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| format!("Failed to remove token file: {e}"))?;
    Ok(true)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), String> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|e| format!("Failed to set token file permissions: {e}"))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), String> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_token() -> StoredToken {
        serde_json::from_value(json!({
            "access_token": "eyJ0eXAi",
            "token_type": "Bearer",
            "refresh_token": "refresh",
            "resource": "https://graph.windows.net",
            "tenant_id": "t1",
            "user_id": "u1",
            "expires_on": "1577836800",
            "scope": "Directory.Read",
            "id_token": "header.payload.sig"
        }))
        .unwrap()
    }

    #[test]
    fn test_token_path_in_temp_dir() {
        assert!(token_path().starts_with(std::env::temp_dir()));
        assert!(token_path().ends_with(TOKEN_FILENAME));
    }

    #[test]
    fn test_read_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        assert!(read_token_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read_preserves_unknown_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("token.json");
        let token = sample_token();

        write_token_to(&path, &token).unwrap();
        let loaded = read_token_from(&path).unwrap().unwrap();

        assert_eq!(loaded, token);
        assert_eq!(loaded.extra.get("scope"), Some(&json!("Directory.Read")));
        assert_eq!(loaded.tenant_id.as_deref(), Some("t1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_private() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        write_token_to(&path, &sample_token()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        assert!(!remove_token_at(&path).unwrap());
        write_token_to(&path, &sample_token()).unwrap();
        assert!(remove_token_at(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();
        let err = read_token_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse token file"));
    }

    #[test]
    fn test_expiry() {
        let token = sample_token();
        let expiry = token.expires_at().unwrap();
        assert_eq!(expiry.timestamp(), 1_577_836_800);
        assert!(token.is_expired_at(Utc::now()));

        let mut numeric = sample_token();
        numeric
            .extra
            .insert("expires_on".to_string(), json!(4_102_444_800_i64));
        assert!(!numeric.is_expired_at(Utc::now()));

        let mut unknown = sample_token();
        unknown.extra.remove("expires_on");
        assert!(!unknown.is_expired_at(Utc::now()));
    }
}
