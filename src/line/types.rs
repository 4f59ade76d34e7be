use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Body LINE posts to the webhook endpoint.
///
/// Events stay untyped until picked so that a malformed trailing event
/// cannot reject the whole delivery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<Value>,
}

impl WebhookPayload {
    /// Only the first event of a delivery is ever processed; the rest of the
    /// batch is dropped.
    pub fn first_event(&self) -> Option<Event> {
        let raw = self.events.first()?;
        match Event::deserialize(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Ignoring malformed first event: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub message: Option<EventMessage>,
    #[serde(default)]
    pub reply_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub id: String,
}

impl Event {
    pub fn is_message(&self) -> bool {
        self.event_type == "message"
    }

    /// The message id when this is an image message event.
    pub fn image_message_id(&self) -> Option<&str> {
        match &self.message {
            Some(message) if self.is_message() && message.message_type == "image" => {
                Some(message.id.as_str())
            }
            _ => None,
        }
    }
}

/// Raw image bytes fetched from the LINE content endpoint.
#[derive(Debug, Clone)]
pub struct ImageContent {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest<'a> {
    pub reply_token: &'a str,
    pub messages: Vec<TextMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextMessage<'a> {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub text: &'a str,
}

impl<'a> ReplyRequest<'a> {
    pub fn text(reply_token: &'a str, text: &'a str) -> Self {
        Self {
            reply_token,
            messages: vec![TextMessage {
                message_type: "text",
                text,
            }],
        }
    }
}
