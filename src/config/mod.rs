mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, str::FromStr};
use tracing::debug;

/// Builds the process configuration: optional YAML file from `CONFIG_PATH`,
/// then environment overrides, then validation of the required settings.
pub async fn load() -> Result<Config> {
    let mut config = match env::var("CONFIG_PATH") {
        Ok(config_path) => {
            debug!("Loading configuration from: {}", config_path);
            let config_str = tokio::fs::read_to_string(&config_path).await?;
            from_yaml_str(&config_str)?
        }
        Err(_) => Config::default(),
    };

    config.apply_env(|key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

pub fn from_yaml_str(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content)?;
    Ok(config)
}

impl Config {
    /// Overlays settings from `lookup`, which maps an environment variable
    /// name to its value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("LINE_CHANNEL_ACCESS_TOKEN") {
            self.line.channel_access_token = token;
        }
        if let Some(url) = lookup("AI_API_URL") {
            self.classifier.base_url = url;
        }
        if let Some(base) = lookup("LINE_API_BASE") {
            self.line.api_base = base;
        }
        if let Some(base) = lookup("LINE_DATA_API_BASE") {
            self.line.data_api_base = base;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(name) = lookup("SERVICE_NAME") {
            self.server.service_name = name;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.server.logs.level = level;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            self.server.port = port;
        }
        if let Some(policy) = parse_var(&lookup, "NON_IMAGE_POLICY")? {
            self.relay.non_image_policy = policy;
        }
        if let Some(ms) = parse_var(&lookup, "IMAGE_FETCH_TIMEOUT_MS")? {
            self.relay.image_fetch_timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "CLASSIFIER_TIMEOUT_MS")? {
            self.classifier.timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "REPLY_TIMEOUT_MS")? {
            self.line.reply_timeout_ms = ms;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.line.channel_access_token.trim().is_empty() {
            return Err(Error::config("LINE_CHANNEL_ACCESS_TOKEN must be set"));
        }
        if self.classifier.base_url.trim().is_empty() {
            return Err(Error::config("AI_API_URL must be set"));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::config(format!("{}: {}", key, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 10000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.line.api_base, "https://api.line.me");
        assert_eq!(config.line.data_api_base, "https://api-data.line.me");
        assert_eq!(config.relay.image_fetch_timeout_ms, 10_000);
        assert_eq!(config.classifier.timeout_ms, 20_000);
        assert_eq!(config.relay.non_image_policy, NonImagePolicy::Ignore);
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("LINE_CHANNEL_ACCESS_TOKEN", "token-123"),
                ("AI_API_URL", "http://classifier:8000"),
                ("PORT", "8081"),
                ("NON_IMAGE_POLICY", "Prompt"),
                ("CLASSIFIER_TIMEOUT_MS", "30000"),
            ]))
            .unwrap();

        assert_eq!(config.line.channel_access_token, "token-123");
        assert_eq!(config.classifier.base_url, "http://classifier:8000");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.relay.non_image_policy, NonImagePolicy::Prompt);
        assert_eq!(config.classifier.timeout_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup_from(&[("PORT", "not-a-port")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.starts_with("PORT")));
    }

    #[test]
    fn test_invalid_policy_is_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup_from(&[("NON_IMAGE_POLICY", "shout")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[("AI_API_URL", "http://classifier")]))
            .unwrap();

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: LINE_CHANNEL_ACCESS_TOKEN must be set"
        );
    }

    #[test]
    fn test_missing_classifier_url_fails_validation() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[("LINE_CHANNEL_ACCESS_TOKEN", "token")]))
            .unwrap();

        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: AI_API_URL must be set");
    }
}
