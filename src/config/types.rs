use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Channel access token; sent as a bearer credential on every LINE call.
    #[serde(default)]
    pub channel_access_token: String,
    #[serde(default = "default_line_api_base")]
    pub api_base: String,
    #[serde(default = "default_line_data_api_base")]
    pub data_api_base: String,
    #[serde(default = "default_reply_timeout_ms")]
    pub reply_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of the classifier; `/predict` is appended.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_classifier_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub non_image_policy: NonImagePolicy,
    #[serde(default = "default_image_fetch_timeout_ms")]
    pub image_fetch_timeout_ms: u64,
}

/// What to do with message events that do not carry an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonImagePolicy {
    /// Drop the event without any outbound call.
    #[default]
    Ignore,
    /// Answer with the fixed "please send a face photo" prompt.
    Prompt,
}

impl FromStr for NonImagePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "prompt" => Ok(Self::Prompt),
            other => Err(format!(
                "unknown non-image policy '{}', expected 'ignore' or 'prompt'",
                other
            )),
        }
    }
}

impl LineConfig {
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl RelayConfig {
    pub fn image_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.image_fetch_timeout_ms)
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_access_token: String::new(),
            api_base: default_line_api_base(),
            data_api_base: default_line_data_api_base(),
            reply_timeout_ms: default_reply_timeout_ms(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_ms: default_classifier_timeout_ms(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service_name: default_service_name(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            non_image_policy: NonImagePolicy::default(),
            image_fetch_timeout_ms: default_image_fetch_timeout_ms(),
        }
    }
}

fn default_line_api_base() -> String {
    "https://api.line.me".to_string()
}

fn default_line_data_api_base() -> String {
    "https://api-data.line.me".to_string()
}

fn default_reply_timeout_ms() -> u64 {
    10_000
}

fn default_classifier_timeout_ms() -> u64 {
    20_000
}

fn default_image_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_service_name() -> String {
    "line-bmi-relay".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
