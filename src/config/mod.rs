use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::utils::error::{ClientError, ClientResult};

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_SESSION_DIR: &str = ".ticketdesk";
const SESSION_FILE_NAME: &str = "session.json";
const DEFAULT_DASHBOARD_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub early_bird_multiplier: Decimal,
    /// Applies to every call except the dashboard and health probes.
    pub request_timeout: Option<Duration>,
    pub dashboard_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_DIR).join(SESSION_FILE_NAME),
            early_bird_multiplier: Decimal::new(8, 1),
            request_timeout: None,
            dashboard_timeout: Duration::from_secs(DEFAULT_DASHBOARD_TIMEOUT_SECS),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = non_empty("TICKETDESK_API_URL")
            .or_else(|| non_empty("NEXT_PUBLIC_API_URL"))
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let session_file = match non_empty("TICKETDESK_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => non_empty("HOME")
                .map(|home| {
                    PathBuf::from(home)
                        .join(DEFAULT_SESSION_DIR)
                        .join(SESSION_FILE_NAME)
                })
                .unwrap_or(defaults.session_file),
        };

        let early_bird_multiplier = match non_empty("TICKETDESK_EARLY_BIRD_MULTIPLIER") {
            Some(raw) => parse_multiplier(&raw)?,
            None => defaults.early_bird_multiplier,
        };

        let request_timeout = non_empty("TICKETDESK_REQUEST_TIMEOUT_SECS")
            .map(|raw| parse_secs("TICKETDESK_REQUEST_TIMEOUT_SECS", &raw))
            .transpose()?;

        let dashboard_timeout = non_empty("TICKETDESK_DASHBOARD_TIMEOUT_SECS")
            .map(|raw| parse_secs("TICKETDESK_DASHBOARD_TIMEOUT_SECS", &raw))
            .transpose()?
            .unwrap_or(defaults.dashboard_timeout);

        let health_timeout = non_empty("TICKETDESK_HEALTH_TIMEOUT_SECS")
            .map(|raw| parse_secs("TICKETDESK_HEALTH_TIMEOUT_SECS", &raw))
            .transpose()?
            .unwrap_or(defaults.health_timeout);

        tracing::debug!(api = %api_base_url, session = %session_file.display(), "Configuration loaded");

        Ok(Self {
            api_base_url,
            session_file,
            early_bird_multiplier,
            request_timeout,
            dashboard_timeout,
            health_timeout,
        })
    }
}

fn parse_multiplier(raw: &str) -> ClientResult<Decimal> {
    let value = Decimal::from_str(raw.trim()).map_err(|e| {
        ClientError::Config(format!("Invalid early-bird multiplier '{}': {}", raw, e))
    })?;

    if value <= Decimal::ZERO {
        return Err(ClientError::Config(format!(
            "Early-bird multiplier must be positive, got {}",
            value
        )));
    }
    Ok(value)
}

fn parse_secs(key: &str, raw: &str) -> ClientResult<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ClientError::Config(format!("Invalid {} '{}': {}", key, raw, e)))?;

    if secs == 0 {
        return Err(ClientError::Config(format!("{} must be positive, got 0", key)));
    }
    Ok(Duration::from_secs(secs))
}
