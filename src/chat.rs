//! Itinerary refinement through a hosted language model

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::Service;
use crate::http::{self, check_status, read_json};
use crate::{NavMindError, Result};

const NO_RESPONSE: &str = "No response";

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Single-turn completion; no history and no system prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Hugging Face inference client
pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
    model: String,
    token: String,
}

impl HuggingFaceClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            token: token.into(),
        }
    }
}

/// Pull the generated text out of whatever shape the endpoint returned.
///
/// Lists yield their first element's `generated_text`, objects their own;
/// any other value is rendered as-is.
#[must_use]
pub fn extract_generated_text(response: &Value) -> String {
    let generated = |value: Option<&Value>| {
        value
            .and_then(|v| v.get("generated_text"))
            .map(|text| match text {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| NO_RESPONSE.to_string())
    };

    match response {
        Value::Array(items) => generated(items.first()),
        Value::Object(_) => generated(Some(response)),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl LanguageModel for HuggingFaceClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Sending refinement prompt to {}", self.model);

        let response = self
            .client
            .post(http::endpoint(&self.base_url, &format!("models/{}", self.model)))
            .bearer_auth(&self.token)
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| NavMindError::transport(Service::LanguageModel, &e))?;

        let response = check_status(Service::LanguageModel, response).await?;
        let body: Value = read_json(Service::LanguageModel, response).await?;

        Ok(extract_generated_text(&body))
    }
}

/// Render a failed completion the way the dashboard shows it
#[must_use]
pub fn response_or_error(result: Result<String>) -> String {
    result.unwrap_or_else(|err| format!("Chatbot error: {err}"))
}
