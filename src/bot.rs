//! Bot: coordinates sessions, scoring, persistence, and channels.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::Mutex;

use tracing::{debug, info, warn};

use crate::channels::{ChannelManager, IncomingMessage, OutgoingResponse};
use crate::error::Error;
use crate::llm::GeminiClient;
use crate::scoring;
use crate::store::{ResultLog, TestRecord};
use crate::survey::{self, MENU_LABELS, Outcome, Reply, Session};

/// What came out of the locked session step.
enum Step {
    Reply(Reply),
    Finished(Session),
}

/// The survey bot: per-user sessions driving the survey conversation,
/// with scoring and persistence at the end of each completed run.
pub struct Bot {
    sessions: Mutex<HashMap<String, Session>>,
    results: ResultLog,
    reflections: Option<GeminiClient>,
    channels: Arc<ChannelManager>,
}

impl Bot {
    pub fn new(
        results: ResultLog,
        reflections: Option<GeminiClient>,
        channels: ChannelManager,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            results,
            reflections,
            channels: Arc::new(channels),
        }
    }

    /// Run the main loop: start the channels, feed each message through
    /// the survey, route the response back to its channel.
    pub async fn run(self) -> Result<(), Error> {
        let mut messages = self.channels.start_all().await?;

        tracing::info!("Bot ready and listening");

        loop {
            let message = tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received, shutting down...");
                    break;
                }
                msg = messages.next() => {
                    match msg {
                        Some(m) => m,
                        None => {
                            tracing::info!("All channel streams ended, shutting down...");
                            break;
                        }
                    }
                }
            };

            debug!(channel = %message.channel, user_id = %message.user_id, "Message received");
            let response = self.handle_message(&message).await;
            if let Err(e) = self.channels.respond(&message, response).await {
                tracing::error!("Failed to send response: {}", e);
            }
        }

        self.channels.shutdown_all().await?;
        Ok(())
    }

    /// Handle one incoming message, producing the response to send back.
    ///
    /// Always answers with something; validation and save failures become
    /// the fixed user-facing error texts rather than errors, and every
    /// completed or failed test ends back at the main menu.
    pub async fn handle_message(&self, message: &IncomingMessage) -> OutgoingResponse {
        let step = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.entry(message.user_id.clone()).or_default();
            match survey::submit(session, &message.content) {
                Outcome::Reply(reply) => Step::Reply(reply),
                // Take the answers and reset the slot before any IO, so
                // the session is already back at the menu whatever
                // finalize does.
                Outcome::Finalize => Step::Finished(std::mem::take(session)),
            }
        };

        match step {
            Step::Reply(reply) => render_reply(reply),
            Step::Finished(finished) => self.finalize(message, &finished).await,
        }
    }

    /// Score, persist, and report one finished session.
    ///
    /// 1. Validate the six scaled answers and compute the averages.
    /// 2. Append the record to the user's result log.
    /// 3. Build the report, with the optional Gemini reflection appended.
    async fn finalize(&self, message: &IncomingMessage, finished: &Session) -> OutgoingResponse {
        let result = match scoring::evaluate(finished) {
            Ok(result) => result,
            Err(e) => {
                warn!(user_id = %message.user_id, error = %e, "Scale validation failed");
                return menu_response(survey::prompts::SCALE_ERROR);
            }
        };

        let record = TestRecord::from_result(&message.user_id, &result);
        if let Err(e) = self.results.append(&record).await {
            warn!(user_id = %message.user_id, error = %e, "Failed to save result");
            return menu_response(survey::prompts::SAVE_ERROR);
        }
        info!(
            user_id = %message.user_id,
            wellbeing = record.wellbeing,
            activity = record.activity,
            mood = record.mood,
            "Test recorded"
        );

        let mut text = scoring::report(&result.scores);
        if let Some(client) = &self.reflections {
            match client.reflection(message.user_name.as_deref(), &result).await {
                Ok(reflection) => {
                    text.push_str("\n\n");
                    text.push_str(&reflection);
                }
                Err(e) => {
                    warn!(error = %e, "Reflection call failed; sending report without it");
                }
            }
        }
        menu_response(text)
    }
}

fn render_reply(reply: Reply) -> OutgoingResponse {
    let response = OutgoingResponse::text(reply.text);
    if reply.show_menu {
        response.with_menu(MENU_LABELS)
    } else {
        response
    }
}

/// Wrap a final text with the returning main-menu prompt.
fn menu_response(text: impl Into<String>) -> OutgoingResponse {
    let mut content = text.into();
    content.push_str("\n\n");
    content.push_str(survey::prompts::WELCOME);
    OutgoingResponse::text(content).with_menu(MENU_LABELS)
}
