//! `aadgraph healthcheck --appId <id>`
//!
//! Fetches the application and its service principal and evaluates a fixed
//! set of checks. Any failed check makes the command exit with status 1.

use aadgraph_sdk::GraphClient;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use console::style;
use serde_json::Value;
use std::fmt;
use url::Url;

use crate::apps::{find_application, find_service_principal};
use crate::commands::run_cli_async;
use crate::common::spinner;
use crate::session::Session;

/// Credentials expiring within this many days produce a warning.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Arguments for `healthcheck`.
#[derive(Args, Debug, Clone)]
pub struct HealthcheckArgs {
    /// Application (client) id of the app registration
    #[arg(long = "appId", value_name = "APP_ID")]
    pub app_id: String,
}

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Nothing to report
    Pass,
    /// Worth a look, does not fail the command
    Warn,
    /// Fails the command
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pass => style("PASS").green(),
            Self::Warn => style("WARN").yellow(),
            Self::Fail => style("FAIL").red(),
        };
        write!(f, "{label}")
    }
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Check name
    pub name: &'static str,
    /// Outcome
    pub status: CheckStatus,
    /// Explanation shown next to the outcome
    pub detail: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }
}

/// Check an application registration.
pub async fn run(args: HealthcheckArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: HealthcheckArgs) -> Result<(), String> {
    let session = Session::load()?;

    let fetch_spinner = spinner("Fetching application...");
    let results = check_application(&session.client, &args.app_id, Utc::now()).await;
    fetch_spinner.finish_and_clear();
    let results = results?;

    println!("{}\n", render(&results));
    let failed = results
        .iter()
        .filter(|result| result.status == CheckStatus::Fail)
        .count();
    if failed > 0 {
        return Err(format!("{failed} health check(s) failed for appId {}", args.app_id));
    }
    println!("✅ All health checks passed for appId {}\n", args.app_id);
    Ok(())
}

/// Fetch the application and service principal for `app_id` and evaluate them.
pub async fn check_application(
    client: &GraphClient,
    app_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<CheckResult>, String> {
    let application = find_application(client, app_id)
        .await?
        .ok_or_else(|| format!("No application found with appId '{app_id}'"))?;
    let service_principal = find_service_principal(client, app_id).await?;
    Ok(evaluate(&application, service_principal.as_ref(), now))
}

/// Evaluate every check against an application and its service principal.
pub fn evaluate(
    application: &Value,
    service_principal: Option<&Value>,
    now: DateTime<Utc>,
) -> Vec<CheckResult> {
    vec![
        check_service_principal(service_principal),
        check_credentials("Password credentials", application, "passwordCredentials", now),
        check_credentials("Key credentials", application, "keyCredentials", now),
        check_reply_urls(application),
        check_required_resource_access(application),
    ]
}

fn check_service_principal(service_principal: Option<&Value>) -> CheckResult {
    const NAME: &str = "Service principal";
    match service_principal {
        Some(sp) => {
            let object_id = sp.get("objectId").and_then(Value::as_str).unwrap_or("?");
            CheckResult::new(NAME, CheckStatus::Pass, format!("objectId {object_id}"))
        }
        None => CheckResult::new(
            NAME,
            CheckStatus::Fail,
            "No service principal in this tenant",
        ),
    }
}

fn check_credentials(
    name: &'static str,
    application: &Value,
    field: &str,
    now: DateTime<Utc>,
) -> CheckResult {
    let credentials = array(application, field);
    if credentials.is_empty() {
        return CheckResult::new(name, CheckStatus::Pass, "None configured");
    }

    let warning_horizon = now + Duration::days(EXPIRY_WARNING_DAYS);
    let mut expired = Vec::new();
    let mut expiring = Vec::new();
    let mut unreadable = Vec::new();
    for credential in credentials {
        let label = credential
            .get("keyId")
            .and_then(Value::as_str)
            .unwrap_or("unknown key");
        let Some(end) = credential
            .get("endDate")
            .and_then(Value::as_str)
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
            .map(|end| end.with_timezone(&Utc))
        else {
            unreadable.push(format!("{label} has no readable endDate"));
            continue;
        };
        if end <= now {
            expired.push(format!("{label} expired {}", end.format("%Y-%m-%d")));
        } else if end <= warning_horizon {
            expiring.push(format!("{label} expires {}", end.format("%Y-%m-%d")));
        }
    }

    if !expired.is_empty() {
        CheckResult::new(name, CheckStatus::Fail, expired.join(", "))
    } else if !expiring.is_empty() || !unreadable.is_empty() {
        expiring.extend(unreadable);
        CheckResult::new(name, CheckStatus::Warn, expiring.join(", "))
    } else {
        CheckResult::new(
            name,
            CheckStatus::Pass,
            format!("{} valid", credentials.len()),
        )
    }
}

fn check_reply_urls(application: &Value) -> CheckResult {
    const NAME: &str = "Reply URLs";
    let reply_urls: Vec<&str> = array(application, "replyUrls")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    if reply_urls.is_empty() {
        return CheckResult::new(NAME, CheckStatus::Pass, "None configured");
    }

    let insecure: Vec<&str> = reply_urls
        .iter()
        .copied()
        .filter(|url| !is_secure_reply_url(url))
        .collect();
    if insecure.is_empty() {
        CheckResult::new(
            NAME,
            CheckStatus::Pass,
            format!("{} secure", reply_urls.len()),
        )
    } else {
        CheckResult::new(
            NAME,
            CheckStatus::Fail,
            format!("Not HTTPS: {}", insecure.join(", ")),
        )
    }
}

/// HTTPS, or plain HTTP to a loopback host.
pub fn is_secure_reply_url(reply_url: &str) -> bool {
    let Ok(url) = Url::parse(reply_url) else {
        return false;
    };
    match url.scheme() {
        "https" => true,
        "http" => matches!(
            url.host_str(),
            Some("localhost" | "127.0.0.1" | "[::1]")
        ),
        _ => false,
    }
}

fn check_required_resource_access(application: &Value) -> CheckResult {
    const NAME: &str = "Required resource access";
    let resources = array(application, "requiredResourceAccess");
    if resources.is_empty() {
        CheckResult::new(NAME, CheckStatus::Warn, "The app requests no API permissions")
    } else {
        CheckResult::new(
            NAME,
            CheckStatus::Pass,
            format!("{} resource(s)", resources.len()),
        )
    }
}

fn array<'a>(value: &'a Value, field: &str) -> &'a [Value] {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn render(results: &[CheckResult]) -> String {
    let width = results
        .iter()
        .map(|result| result.name.len())
        .max()
        .unwrap_or(0);
    results
        .iter()
        .map(|result| {
            format!(
                "{}  {:<width$}  {}",
                result.status, result.name, result.detail
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn status_of(results: &[CheckResult], name: &str) -> CheckStatus {
        results
            .iter()
            .find(|result| result.name == name)
            .map(|result| result.status)
            .unwrap()
    }

    #[test]
    fn test_healthy_application() {
        let application = json!({
            "appId": "a1",
            "passwordCredentials": [{"keyId": "p1", "endDate": "2025-06-01T00:00:00Z"}],
            "keyCredentials": [],
            "replyUrls": ["https://app.example.com/auth", "http://localhost:3000/callback"],
            "requiredResourceAccess": [{"resourceAppId": "00000002-0000-0000-c000-000000000000"}]
        });
        let sp = json!({"objectId": "sp1"});
        let results = evaluate(&application, Some(&sp), now());

        assert!(results.iter().all(|result| result.status == CheckStatus::Pass));
        assert_eq!(results[0].detail, "objectId sp1");
    }

    #[test]
    fn test_flags_expired_and_expiring_credentials() {
        let application = json!({
            "passwordCredentials": [
                {"keyId": "old", "endDate": "2024-05-01T00:00:00Z"},
                {"keyId": "ok", "endDate": "2026-01-01T00:00:00Z"}
            ],
            "keyCredentials": [{"keyId": "soon", "endDate": "2024-06-15T12:00:00.123Z"}]
        });
        let results = evaluate(&application, None, now());

        assert_eq!(status_of(&results, "Password credentials"), CheckStatus::Fail);
        assert_eq!(results[1].detail, "old expired 2024-05-01");
        assert_eq!(status_of(&results, "Key credentials"), CheckStatus::Warn);
        assert_eq!(status_of(&results, "Service principal"), CheckStatus::Fail);
        assert_eq!(status_of(&results, "Required resource access"), CheckStatus::Warn);
    }

    #[test]
    fn test_unreadable_end_date_is_not_valid() {
        let application = json!({
            "passwordCredentials": [
                {"keyId": "p", "endDate": "garbage"},
                {"keyId": "ok", "endDate": "2026-01-01T00:00:00Z"}
            ],
            "keyCredentials": [{"keyId": "k"}]
        });
        let results = evaluate(&application, None, now());

        let password = results.iter().find(|r| r.name == "Password credentials").unwrap();
        assert_eq!(password.status, CheckStatus::Warn);
        assert_eq!(password.detail, "p has no readable endDate");
        let key = results.iter().find(|r| r.name == "Key credentials").unwrap();
        assert_eq!(key.status, CheckStatus::Warn);
        assert_eq!(key.detail, "k has no readable endDate");
    }

    #[test]
    fn test_expired_wins_over_unreadable_end_date() {
        let application = json!({
            "passwordCredentials": [
                {"keyId": "p", "endDate": "garbage"},
                {"keyId": "old", "endDate": "2019-03-21T00:00:00.0000000Z"}
            ]
        });
        let results = evaluate(&application, None, now());
        let password = results.iter().find(|r| r.name == "Password credentials").unwrap();
        assert_eq!(password.status, CheckStatus::Fail);
        assert_eq!(password.detail, "old expired 2019-03-21");
    }

    #[test]
    fn test_flags_insecure_reply_urls() {
        let application = json!({
            "replyUrls": ["http://app.example.com/auth", "https://ok.example.com", "http://127.0.0.1:8080/cb"]
        });
        let results = evaluate(&application, None, now());
        let reply = results.iter().find(|r| r.name == "Reply URLs").unwrap();
        assert_eq!(reply.status, CheckStatus::Fail);
        assert_eq!(reply.detail, "Not HTTPS: http://app.example.com/auth");
    }

    #[test]
    fn test_is_secure_reply_url() {
        assert!(is_secure_reply_url("https://example.com"));
        assert!(is_secure_reply_url("http://localhost:3000/cb"));
        assert!(is_secure_reply_url("http://[::1]/cb"));
        assert!(!is_secure_reply_url("http://example.com"));
        assert!(!is_secure_reply_url("not a url"));
        assert!(!is_secure_reply_url("ms-app://s-1-15-2"));
    }

    #[test]
    fn test_render_lists_every_check() {
        console::set_colors_enabled(false);
        let results = evaluate(&json!({}), None, now());
        let text = render(&results);
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().starts_with("FAIL  Service principal"));
    }
}
