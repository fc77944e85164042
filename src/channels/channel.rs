//! Channel trait and message types shared by all transports.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ChannelError;

/// A message arriving from a transport.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Name of the channel that produced the message.
    pub channel: String,
    /// Stable user identifier within that channel.
    pub user_id: String,
    /// Display name, when the transport knows one.
    pub user_name: Option<String>,
    /// Raw message text.
    pub content: String,
    /// Transport-specific routing data (e.g. Telegram chat_id).
    pub metadata: serde_json::Value,
}

impl IncomingMessage {
    pub fn new(
        channel: impl Into<String>,
        user_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            user_id: user_id.into(),
            user_name: None,
            content: content.into(),
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }
}

/// A reply for the transport to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingResponse {
    /// Text to display.
    pub content: String,
    /// Menu choices to offer alongside the text, if any. Rendering is the
    /// transport's concern (keyboard buttons, a printed hint, nothing).
    pub menu: Option<Vec<String>>,
}

impl OutgoingResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            menu: None,
        }
    }

    pub fn with_menu<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.menu = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

/// Stream of incoming messages produced by a started channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A message transport the bot can listen on.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Short identifier used for routing responses.
    fn name(&self) -> &str;

    /// Begin listening; returns the stream of incoming messages.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Deliver a response to the user the message came from.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;

    /// Verify the transport is reachable before starting.
    async fn health_check(&self) -> Result<(), ChannelError>;

    /// Release transport resources.
    async fn shutdown(&self) -> Result<(), ChannelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_message_defaults() {
        let msg = IncomingMessage::new("cli", "local-user", "hello");
        assert_eq!(msg.channel, "cli");
        assert_eq!(msg.user_id, "local-user");
        assert_eq!(msg.content, "hello");
        assert!(msg.user_name.is_none());
        assert!(msg.metadata.is_null());
    }

    #[test]
    fn incoming_message_builders() {
        let msg = IncomingMessage::new("telegram", "42", "hi")
            .with_metadata(serde_json::json!({"chat_id": "42"}))
            .with_user_name("Alice");
        assert_eq!(msg.metadata.get("chat_id").and_then(|v| v.as_str()), Some("42"));
        assert_eq!(msg.user_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn outgoing_response_text_has_no_menu() {
        let resp = OutgoingResponse::text("done");
        assert_eq!(resp.content, "done");
        assert!(resp.menu.is_none());
    }

    #[test]
    fn outgoing_response_with_menu() {
        let resp = OutgoingResponse::text("pick one").with_menu(["Test", "Help"]);
        assert_eq!(
            resp.menu,
            Some(vec!["Test".to_string(), "Help".to_string()])
        );
    }
}
