pub mod reply;

use crate::{
    Result,
    classifier::Classifier,
    config::NonImagePolicy,
    line::{Event, MessagingApi, WebhookPayload},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of handling one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// No outbound call was made.
    Ignored(&'static str),
    /// A reply was attempted with this text.
    Replied(String),
}

/// Stateless relay between the messaging platform and the classifier.
#[derive(Clone)]
pub struct Relay {
    messaging: Arc<dyn MessagingApi>,
    classifier: Arc<dyn Classifier>,
    non_image_policy: NonImagePolicy,
}

impl Relay {
    pub fn new(
        messaging: Arc<dyn MessagingApi>,
        classifier: Arc<dyn Classifier>,
        non_image_policy: NonImagePolicy,
    ) -> Self {
        Self {
            messaging,
            classifier,
            non_image_policy,
        }
    }

    /// Handles a webhook delivery. Only the first event is considered and at
    /// most one reply is sent for it.
    pub async fn handle(&self, payload: &WebhookPayload) -> Disposition {
        let Some(event) = payload.first_event() else {
            debug!("Webhook delivery carried no usable event");
            return Disposition::Ignored("no event");
        };
        if payload.events.len() > 1 {
            debug!(
                "Dropping {} trailing events from batch",
                payload.events.len() - 1
            );
        }

        self.handle_event(&event).await
    }

    async fn handle_event(&self, event: &Event) -> Disposition {
        if !event.is_message() {
            debug!("Ignoring non-message event: {}", event.event_type);
            return Disposition::Ignored("not a message event");
        }

        let Some(reply_token) = event.reply_token.as_deref() else {
            warn!("Message event without reply token, nothing to answer through");
            return Disposition::Ignored("no reply token");
        };

        let text = match event.image_message_id() {
            Some(message_id) => {
                info!("Processing image message {}", message_id);
                match self.evaluate(message_id).await {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Failed to evaluate image {}: {}", message_id, e);
                        reply::fallback(&e).to_string()
                    }
                }
            }
            None => match self.non_image_policy {
                NonImagePolicy::Ignore => {
                    debug!("Ignoring non-image message");
                    return Disposition::Ignored("not an image");
                }
                NonImagePolicy::Prompt => reply::NON_IMAGE_PROMPT.to_string(),
            },
        };

        if let Err(e) = self.messaging.reply(reply_token, &text).await {
            error!("Failed to send reply: {}", e);
        }

        Disposition::Replied(text)
    }

    async fn evaluate(&self, message_id: &str) -> Result<String> {
        let image = self.messaging.fetch_content(message_id).await?;
        let prediction = self.classifier.predict(image).await?;
        Ok(reply::compose(&prediction))
    }
}
