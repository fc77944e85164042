//! Gemini integration: an optional reflection on a finished test.
//!
//! One plain REST call to the Generative Language API. Failures never
//! block the result message; the caller logs them and moves on.

use secrecy::{ExposeSecret, SecretString};

use crate::error::LlmError;
use crate::scoring::TestResult;

/// Request timeout for generation calls.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

const GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta2/models/gemini-1.5-flash:generateContent";

/// Client for the Generative Language REST API.
pub struct GeminiClient {
    api_key: SecretString,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: SecretString) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::RequestFailed {
                reason: e.to_string(),
            })?;
        Ok(Self { api_key, client })
    }

    /// Generate text for a prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{GENERATE_URL}?key={}", self.api_key.expose_secret());
        let payload = serde_json::json!({
            "contents": [
                { "parts": [{ "text": prompt }] }
            ]
        });

        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(LlmError::RequestFailed {
                reason: format!("generateContent returned {}", resp.status()),
            });
        }

        let data: serde_json::Value = resp.json().await.map_err(|e| LlmError::InvalidResponse {
            reason: e.to_string(),
        })?;

        let text = data
            .get("contents")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse {
                reason: "no generated text in response".into(),
            });
        }
        Ok(text.to_string())
    }

    /// A short reflection on a finished test, for appending to the report.
    /// The display name, when the channel knows it, lets the reflection
    /// address the user directly.
    pub async fn reflection(
        &self,
        user_name: Option<&str>,
        result: &TestResult,
    ) -> Result<String, LlmError> {
        self.generate(&reflection_prompt(user_name, result)).await
    }
}

fn reflection_prompt(user_name: Option<&str>, result: &TestResult) -> String {
    format!(
        "{} completed a short wellbeing check-in.\n\
         Wellbeing: {:.1}/7, Activity: {:.1}/7, Mood: {:.1}/7.\n\
         Three words for their state: {}.\n\
         Main influence today: {}.\n\
         Write two or three short, encouraging sentences reflecting on this. \
         Plain text, no lists.",
        user_name.unwrap_or("A user"),
        result.scores.wellbeing,
        result.scores.activity,
        result.scores.mood,
        result.open_1,
        result.open_2,
    )
}
