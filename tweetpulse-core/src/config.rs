use crate::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";
pub const DEFAULT_DATA_PATH: &str = "data/tweets.json";

/// The four user-context OAuth 1.0a credentials.
///
/// Values are optional here on purpose: a missing credential surfaces as an
/// authentication failure on the first signed request, not at startup.
#[derive(Clone, Default)]
pub struct TwitterCredentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_secret: Option<String>,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("api_key", &preview_opt(&self.api_key))
            .field("api_secret", &preview_opt(&self.api_secret))
            .field("access_token", &preview_opt(&self.access_token))
            .field("access_secret", &preview_opt(&self.access_secret))
            .finish()
    }
}

/// Application configuration, built once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: TwitterCredentials,
    pub api_base_url: String,
    pub data_path: PathBuf,
    pub wait_on_rate_limit: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credentials: TwitterCredentials::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            wait_on_rate_limit: true,
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let wait_on_rate_limit = match non_empty("TWITTER_WAIT_ON_RATE_LIMIT") {
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::InvalidValue {
                field: "TWITTER_WAIT_ON_RATE_LIMIT".to_string(),
                value,
            })?,
            None => true,
        };

        let config = Self {
            credentials: TwitterCredentials {
                api_key: non_empty("TWITTER_API_KEY"),
                api_secret: non_empty("TWITTER_API_SECRET"),
                access_token: non_empty("TWITTER_ACCESS_TOKEN"),
                access_secret: non_empty("TWITTER_ACCESS_SECRET"),
            },
            api_base_url: non_empty("TWITTER_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            data_path: non_empty("TWEETPULSE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            wait_on_rate_limit,
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  TWITTER_API_KEY: {}", preview_opt(&self.credentials.api_key));
        tracing::info!("  TWITTER_API_SECRET: {}", preview_opt(&self.credentials.api_secret));
        tracing::info!("  TWITTER_ACCESS_TOKEN: {}", preview_opt(&self.credentials.access_token));
        tracing::info!("  TWITTER_ACCESS_SECRET: {}", preview_opt(&self.credentials.access_secret));
        tracing::info!("  api_base_url: {}", self.api_base_url);
        tracing::info!("  data_path: {}", self.data_path.display());
        tracing::info!("  wait_on_rate_limit: {}", self.wait_on_rate_limit);
    }
}

fn preview_opt(val: &Option<String>) -> String {
    match val {
        Some(v) if !v.is_empty() => {
            let n = v.chars().take(4).map(char::len_utf8).sum::<usize>();
            format!("{}...({} chars)", &v[..n], v.chars().count())
        }
        _ => "<not set>".to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
