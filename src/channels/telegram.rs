//! Telegram channel: long-polls the Bot API for updates.
//!
//! Native Bot API implementation: getUpdates long-polling on the way in,
//! sendMessage with an optional reply keyboard on the way out.

use async_trait::async_trait;

use crate::channels::{Channel, IncomingMessage, MessageStream, OutgoingResponse};
use crate::error::ChannelError;

/// Maximum message length for Telegram's sendMessage API.
const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

/// Telegram channel: connects to the Bot API via long-polling.
pub struct TelegramChannel {
    bot_token: String,
    allowed_users: Vec<String>,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: String, allowed_users: Vec<String>) -> Self {
        Self {
            bot_token,
            allowed_users,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{method}", self.bot_token)
    }

    /// Check if a username is in the allowed list.
    pub fn is_user_allowed(&self, username: &str) -> bool {
        self.allowed_users.iter().any(|u| u == "*" || u == username)
    }

    /// Check if any of the provided identities is allowed.
    pub fn is_any_user_allowed<'a, I>(&self, identities: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        identities.into_iter().any(|id| self.is_user_allowed(id))
    }

    /// Send a text message, trying Markdown first with plain text fallback.
    /// Splits long messages that exceed Telegram's 4096 char limit; the
    /// keyboard rides on the final chunk so it lands under the full text.
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        menu: Option<&[String]>,
    ) -> Result<(), ChannelError> {
        let keyboard = menu.map(reply_keyboard);
        let chunks = split_message(text, TELEGRAM_MAX_MESSAGE_LENGTH);
        let last = chunks.len() - 1;

        for (i, chunk) in chunks.iter().enumerate() {
            let kb = if i == last { keyboard.as_ref() } else { None };
            self.send_message_chunk(chat_id, chunk, kb).await?;
        }
        Ok(())
    }

    /// Send a single message chunk (≤4096 chars), Markdown-first with fallback.
    async fn send_message_chunk(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<&serde_json::Value>,
    ) -> Result<(), ChannelError> {
        // Try Markdown first
        let mut markdown_body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown"
        });
        if let Some(kb) = keyboard {
            markdown_body["reply_markup"] = kb.clone();
        }

        let markdown_resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&markdown_body)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "telegram".into(),
                reason: e.to_string(),
            })?;

        if markdown_resp.status().is_success() {
            return Ok(());
        }

        let markdown_status = markdown_resp.status();
        let _markdown_err = markdown_resp.text().await.unwrap_or_default();
        tracing::warn!(
            status = ?markdown_status,
            "Telegram sendMessage with Markdown failed; retrying without parse_mode"
        );

        // Retry without parse_mode
        let mut plain_body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(kb) = keyboard {
            plain_body["reply_markup"] = kb.clone();
        }
        let plain_resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&plain_body)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "telegram".into(),
                reason: e.to_string(),
            })?;

        if !plain_resp.status().is_success() {
            let plain_err = plain_resp.text().await.unwrap_or_default();
            return Err(ChannelError::SendFailed {
                name: "telegram".into(),
                reason: format!(
                    "sendMessage failed (markdown: {}, plain: {})",
                    markdown_status, plain_err
                ),
            });
        }

        Ok(())
    }
}

// ── Channel trait implementation ────────────────────────────────────

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let bot_token = self.bot_token.clone();
        let allowed_users = self.allowed_users.clone();
        let client = self.client.clone();

        tokio::spawn(async move {
            let mut offset: i64 = 0;

            tracing::info!("Telegram channel listening for messages...");

            loop {
                let url = format!("https://api.telegram.org/bot{}/getUpdates", bot_token);
                let body = serde_json::json!({
                    "offset": offset,
                    "timeout": 30,
                    "allowed_updates": ["message"]
                });

                let resp = match client.post(&url).json(&body).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("Telegram poll error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                let data: serde_json::Value = match resp.json().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("Telegram parse error: {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        continue;
                    }
                };

                if let Some(results) = data.get("result").and_then(serde_json::Value::as_array) {
                    for update in results {
                        // Advance offset past this update
                        if let Some(uid) =
                            update.get("update_id").and_then(serde_json::Value::as_i64)
                        {
                            offset = uid + 1;
                        }

                        let Some(message) = update.get("message") else {
                            continue;
                        };

                        let Some(text) = message.get("text").and_then(serde_json::Value::as_str)
                        else {
                            continue;
                        };

                        // Extract user info
                        let username = message
                            .get("from")
                            .and_then(|f| f.get("username"))
                            .and_then(|u| u.as_str())
                            .unwrap_or("unknown");

                        let user_id = message
                            .get("from")
                            .and_then(|f| f.get("id"))
                            .and_then(serde_json::Value::as_i64);
                        let user_id_str = user_id.map(|id| id.to_string());

                        // Check allowlist against both username and numeric ID
                        let is_allowed = {
                            let mut identities = vec![username];
                            if let Some(ref id) = user_id_str {
                                identities.push(id.as_str());
                            }
                            check_user_allowed(&allowed_users, identities.iter().copied())
                        };

                        if !is_allowed {
                            tracing::warn!(
                                "Telegram: ignoring message from unauthorized user: \
                                 username={username}, user_id={}",
                                user_id_str.as_deref().unwrap_or("unknown")
                            );
                            continue;
                        }

                        // Extract chat_id for respond()
                        let chat_id = message
                            .get("chat")
                            .and_then(|c| c.get("id"))
                            .and_then(serde_json::Value::as_i64)
                            .map(|id| id.to_string())
                            .unwrap_or_default();

                        // Extract first name for display
                        let first_name = message
                            .get("from")
                            .and_then(|f| f.get("first_name"))
                            .and_then(|n| n.as_str());

                        // Build IncomingMessage with chat_id in metadata
                        let incoming = IncomingMessage::new(
                            "telegram",
                            user_id_str.as_deref().unwrap_or(username),
                            text,
                        )
                        .with_metadata(serde_json::json!({
                            "chat_id": chat_id,
                            "username": username,
                        }))
                        .with_user_name(first_name.unwrap_or(username));

                        if tx.send(incoming).is_err() {
                            tracing::info!("Telegram listener channel closed");
                            return;
                        }
                    }
                }
            }
        });

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        let chat_id = msg
            .metadata
            .get("chat_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ChannelError::SendFailed {
                name: "telegram".into(),
                reason: "No chat_id in message metadata".into(),
            })?;

        self.send_message(chat_id, &response.content, response.menu.as_deref())
            .await
    }

    async fn health_check(&self) -> Result<(), ChannelError> {
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: e.to_string(),
            })?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: format!("getMe returned {}", resp.status()),
            })
        }
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        tracing::info!("Telegram channel shutting down");
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Check if any identity in the iterator matches the allowed users list.
fn check_user_allowed<'a>(
    allowed_users: &[String],
    identities: impl IntoIterator<Item = &'a str>,
) -> bool {
    let ids: Vec<&str> = identities.into_iter().collect();
    allowed_users
        .iter()
        .any(|u| u == "*" || ids.contains(&u.as_str()))
}

/// Build a persistent reply keyboard, one button per row.
fn reply_keyboard(labels: &[String]) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = labels
        .iter()
        .map(|label| serde_json::json!([{ "text": label }]))
        .collect();
    serde_json::json!({
        "keyboard": rows,
        "resize_keyboard": true
    })
}

/// Split a message into chunks that fit Telegram's character limit.
/// Tries to split on newlines, then spaces, then hard-cuts.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        // Clamp the cut to a char boundary; max_len can land inside a
        // multibyte character and byte slicing would panic there.
        let mut cut = max_len;
        while !remaining.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            // max_len is smaller than the first char; emit it whole.
            cut = match remaining.char_indices().nth(1) {
                Some((next, _)) => next,
                None => remaining.len(),
            };
        }

        // Find a good split point
        let chunk = &remaining[..cut];
        let split_at = chunk
            .rfind('\n')
            .or_else(|| chunk.rfind(' '))
            .unwrap_or(cut);

        // Don't split at position 0 (infinite loop guard)
        let split_at = if split_at == 0 { cut } else { split_at };

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    chunks
}

// ── Tests ───────────────────────────────────────────────────────────
