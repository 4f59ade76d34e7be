use super::types::*;
use crate::{
    Error, Result,
    config::{LineConfig, RelayConfig},
};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// Outbound side of the messaging platform.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Downloads the binary content of a message.
    async fn fetch_content(&self, message_id: &str) -> Result<ImageContent>;

    /// Sends a single text reply. Reply tokens are single-use.
    async fn reply(&self, reply_token: &str, text: &str) -> Result<()>;
}

pub struct LineClient {
    client: reqwest::Client,
    access_token: String,
    api_base: String,
    data_api_base: String,
    fetch_timeout: Duration,
    reply_timeout: Duration,
}

impl LineClient {
    pub fn new(client: reqwest::Client, line: &LineConfig, relay: &RelayConfig) -> Self {
        Self {
            client,
            access_token: line.channel_access_token.clone(),
            api_base: line.api_base.trim_end_matches('/').to_string(),
            data_api_base: line.data_api_base.trim_end_matches('/').to_string(),
            fetch_timeout: relay.image_fetch_timeout(),
            reply_timeout: line.reply_timeout(),
        }
    }

    fn content_url(&self, message_id: &str) -> String {
        format!(
            "{}/v2/bot/message/{}/content",
            self.data_api_base,
            urlencoding::encode(message_id)
        )
    }

    fn reply_url(&self) -> String {
        format!("{}/v2/bot/message/reply", self.api_base)
    }
}

#[async_trait]
impl MessagingApi for LineClient {
    async fn fetch_content(&self, message_id: &str) -> Result<ImageContent> {
        debug!("Fetching content for message {}", message_id);

        let response = self
            .client
            .get(self.content_url(message_id))
            .bearer_auth(&self.access_token)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| Error::from_request("line-content", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                service: "line-content",
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::from_request("line-content", e))?;

        debug!(
            "Fetched {} bytes ({}) for message {}",
            bytes.len(),
            content_type.as_deref().unwrap_or("unknown type"),
            message_id
        );

        Ok(ImageContent {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.reply_url())
            .bearer_auth(&self.access_token)
            .json(&ReplyRequest::text(reply_token, text))
            .timeout(self.reply_timeout)
            .send()
            .await
            .map_err(|e| Error::from_request("line-reply", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                service: "line-reply",
                status: status.as_u16(),
                body,
            });
        }

        debug!("Reply delivered with status {}", status);
        Ok(())
    }
}
