//! Configuration module for environment variables and application settings

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;
pub const DEFAULT_CONFIRMATION_DELAY_MS: u64 = 2000;
pub const DEFAULT_DEEP_LINK_SCHEME: &str = "habibiRizz";

#[derive(Debug, Clone)]
pub struct Config {
    /// Remote admin API
    pub api: ApiConfig,

    /// Where the signed-in session is persisted
    pub session: SessionConfig,

    /// Timers and limits of the list/editor screens
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub search_debounce: Duration,
    /// How long a mutation confirmation stays up before returning to the list
    pub confirmation_delay: Duration,
    pub deep_link_scheme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            confirmation_delay: Duration::from_millis(DEFAULT_CONFIRMATION_DELAY_MS),
            deep_link_scheme: DEFAULT_DEEP_LINK_SCHEME.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .with_context(|| format!("Invalid admin API base URL: {base_url}"))?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("ADMIN_API_BASE_URL")
            .map_err(|_| anyhow!("ADMIN_API_BASE_URL environment variable is required"))?;

        let mut api = ApiConfig::new(&base_url)?;
        api.timeout = Duration::from_secs(parse_or("ADMIN_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            api,

            session: SessionConfig {
                path: env::var("ADMIN_SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_session_path()),
            },

            ui: UiConfig {
                search_debounce: Duration::from_millis(parse_or(
                    "ADMIN_SEARCH_DEBOUNCE_MS",
                    DEFAULT_SEARCH_DEBOUNCE_MS,
                )),
                confirmation_delay: Duration::from_millis(parse_or(
                    "ADMIN_CONFIRMATION_DELAY_MS",
                    DEFAULT_CONFIRMATION_DELAY_MS,
                )),
                deep_link_scheme: env::var("ADMIN_DEEP_LINK_SCHEME")
                    .unwrap_or_else(|_| DEFAULT_DEEP_LINK_SCHEME.to_string()),
            },
        })
    }
}

fn parse_or(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_session_path() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".rizz-admin").join("session.json"),
        Err(_) => PathBuf::from(".rizz-admin-session.json"),
    }
}
