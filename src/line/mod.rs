mod client;
mod types;

pub use client::{LineClient, MessagingApi};
pub use types::{Event, EventMessage, ImageContent, ReplyRequest, TextMessage, WebhookPayload};
