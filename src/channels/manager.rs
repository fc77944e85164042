//! ChannelManager: owns the active transports and fans their messages
//! into one stream.

use std::sync::Arc;

use futures::stream::select_all;
use tracing::{info, warn};

use crate::channels::{Channel, IncomingMessage, MessageStream, OutgoingResponse};
use crate::error::ChannelError;

/// Registry of started channels, routing responses back by channel name.
#[derive(Default)]
pub struct ChannelManager {
    channels: Vec<Arc<dyn Channel>>,
}

impl ChannelManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, channel: Arc<dyn Channel>) {
        info!(channel = channel.name(), "Channel registered");
        self.channels.push(channel);
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Health-check and start every registered channel, merging their
    /// message streams into one.
    pub async fn start_all(&self) -> Result<MessageStream, ChannelError> {
        if self.is_empty() {
            return Err(ChannelError::StartupFailed {
                name: "manager".into(),
                reason: "no channels registered".into(),
            });
        }

        let mut streams = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            channel.health_check().await?;
            streams.push(channel.start().await?);
            info!(channel = channel.name(), "Channel started");
        }
        Ok(Box::pin(select_all(streams)))
    }

    /// Route a response back through the channel the message came from.
    pub async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        let channel = self
            .channels
            .iter()
            .find(|c| c.name() == msg.channel)
            .ok_or_else(|| ChannelError::SendFailed {
                name: msg.channel.clone(),
                reason: "no such channel registered".into(),
            })?;
        channel.respond(msg, response).await
    }

    /// Shut down every channel. Individual failures are logged so the
    /// remaining channels still get their shutdown call.
    pub async fn shutdown_all(&self) -> Result<(), ChannelError> {
        for channel in &self.channels {
            if let Err(e) = channel.shutdown().await {
                warn!(channel = channel.name(), error = %e, "Channel shutdown failed");
            }
        }
        Ok(())
    }
}
