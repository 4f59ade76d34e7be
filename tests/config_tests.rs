use line_bmi_relay::{
    Error,
    config::{self, NonImagePolicy},
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SAMPLE_CONFIG_YAML: &str = r#"
line:
  channel_access_token: "yaml-token"
  reply_timeout_ms: 5000
classifier:
  base_url: "https://bmi-ai-backend.example.com"
  timeout_ms: 30000
server:
  port: 8080
  service_name: "bmi-line-bot"
  logs:
    level: "debug"
relay:
  non_image_policy: prompt
  image_fetch_timeout_ms: 15000
"#;

async fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("config.yaml");
    tokio::fs::write(&path, content).await.unwrap();
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn test_yaml_file_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, SAMPLE_CONFIG_YAML).await;

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    let config = config::from_yaml_str(&content).unwrap();

    assert_eq!(config.line.channel_access_token, "yaml-token");
    assert_eq!(config.line.reply_timeout_ms, 5000);
    assert_eq!(config.line.api_base, "https://api.line.me");
    assert_eq!(config.classifier.timeout_ms, 30_000);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.service_name, "bmi-line-bot");
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.relay.non_image_policy, NonImagePolicy::Prompt);
    assert_eq!(config.relay.image_fetch_timeout_ms, 15_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_environment_overrides_yaml() {
    let mut config = config::from_yaml_str(SAMPLE_CONFIG_YAML).unwrap();

    config
        .apply_env(|key| match key {
            "LINE_CHANNEL_ACCESS_TOKEN" => Some("env-token".to_string()),
            "NON_IMAGE_POLICY" => Some("ignore".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.line.channel_access_token, "env-token");
    assert_eq!(config.relay.non_image_policy, NonImagePolicy::Ignore);
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_empty_yaml_needs_required_settings() {
    let config = config::from_yaml_str("{}").unwrap();

    assert_eq!(config.server.port, 10000);
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let result = config::from_yaml_str("server: [not, a, map]");
    assert!(matches!(result, Err(Error::Yaml(_))));
}
