use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "claude-code";
const USAGE_ENDPOINT: &str = "https://api.anthropic.com/api/oauth/usage";
const ANTHROPIC_BETA: &str = "oauth-2025-04-20";
const FETCH_TIMEOUT_MS: u64 = 5_000;

/// Why a refresh produced no snapshot. `NoCredential` is benign (the fetch
/// path is simply disabled); `Transport` covers network errors, the 5 s
/// timeout, non-OK statuses, and unparsable bodies.
#[derive(Debug)]
pub enum FetchError {
    NoCredential,
    Transport(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NoCredential => write!(f, "no OAuth credential available"),
            FetchError::Transport(msg) => write!(f, "usage endpoint unreachable: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// One rolling rate-limit window as reported by the usage endpoint.
/// Absent fields mean "not displayed", never zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageWindow {
    pub utilization: Option<f64>,
    pub resets_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtraUsage {
    pub is_enabled: bool,
    pub utilization: Option<f64>,
    pub used_credits_cents: Option<f64>,
    pub monthly_limit_cents: Option<f64>,
}

/// Last-known remote usage state. This is the shape persisted to the cache
/// file, so it derives Serialize as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub five_hour: UsageWindow,
    pub seven_day: UsageWindow,
    pub extra_usage: Option<ExtraUsage>,
}

#[derive(Debug, Deserialize)]
struct UsageWindowDto {
    utilization: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    resets_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ExtraUsageDto {
    #[serde(default)]
    is_enabled: bool,
    utilization: Option<f64>,
    used_credits: Option<f64>,
    monthly_limit: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct UsageResponseDto {
    #[serde(default)]
    five_hour: Option<UsageWindowDto>,
    #[serde(default)]
    seven_day: Option<UsageWindowDto>,
    #[serde(default)]
    extra_usage: Option<ExtraUsageDto>,
}

impl From<UsageWindowDto> for UsageWindow {
    fn from(value: UsageWindowDto) -> Self {
        UsageWindow {
            utilization: value.utilization,
            resets_at: value.resets_at,
        }
    }
}

impl From<UsageResponseDto> for UsageSnapshot {
    fn from(dto: UsageResponseDto) -> Self {
        UsageSnapshot {
            five_hour: dto.five_hour.map(UsageWindow::from).unwrap_or_default(),
            seven_day: dto.seven_day.map(UsageWindow::from).unwrap_or_default(),
            extra_usage: dto.extra_usage.map(|e| ExtraUsage {
                is_enabled: e.is_enabled,
                utilization: e.utilization,
                used_credits_cents: e.used_credits,
                monthly_limit_cents: e.monthly_limit,
            }),
        }
    }
}

fn user_agent() -> String {
    match std::env::var("CLAUDE_USAGELINE_USER_AGENT") {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => DEFAULT_USER_AGENT.to_string(),
    }
}

/// One bounded GET against the usage endpoint. No retries; the caller's
/// 60-second cache window absorbs retry pressure.
pub fn fetch_usage(claude_paths: &[PathBuf]) -> Result<UsageSnapshot, FetchError> {
    let token = find_oauth_token(claude_paths).ok_or(FetchError::NoCredential)?;
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
        .build();

    let response = agent
        .get(USAGE_ENDPOINT)
        .set("Authorization", &format!("Bearer {token}"))
        .set("User-Agent", &user_agent())
        .set("Accept", "application/json")
        .set("Content-Type", "application/json")
        .set("anthropic-beta", ANTHROPIC_BETA)
        .call()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let dto: UsageResponseDto = response
        .into_json()
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    Ok(dto.into())
}

fn find_oauth_token(claude_paths: &[PathBuf]) -> Option<String> {
    // Environment overrides win over the credential file
    for env in ["CLAUDE_CODE_OAUTH_TOKEN", "ANTHROPIC_AUTH_TOKEN"] {
        if let Ok(val) = std::env::var(env) {
            let trimmed = val.trim().to_string();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }

    for base_path in claude_paths {
        let credentials_path = base_path.join(".credentials.json");
        if let Ok(raw) = fs::read_to_string(&credentials_path) {
            if let Some(token) = token_from_credentials(&raw) {
                return Some(token);
            }
        }
    }

    None
}

fn token_from_credentials(raw: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(raw).ok()?;
    let access = json
        .get("claudeAiOauth")
        .and_then(|v| v.get("accessToken"))
        .and_then(|v| v.as_str())?
        .trim();
    if access.is_empty() {
        None
    } else {
        Some(access.to_string())
    }
}

fn deserialize_optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    if let Some(s) = opt {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}
