//! # AI Grading Backend
//!
//! [`AiGrader`] implements the [`Grader`] trait by posting the grading prompt to an
//! OpenAI-compatible chat-completions endpoint and returning the content of the first
//! choice.
//!
//! ## Configuration
//!
//! [`AiGrader::from_config`] reads the endpoint, model, API key and request timeout from
//! [`util::config`] (`LLM_API_URL`, `LLM_MODEL`, `LLM_API_KEY`, `LLM_TIMEOUT_SECS`). An
//! empty API key is reported as [`MarkerError::MissingApiKey`] when grading is attempted,
//! so the server can still start and serve everything else.
//!
//! ## Errors
//!
//! - Connection failures and timeouts become [`MarkerError::Transport`].
//! - Non-2xx answers become [`MarkerError::Upstream`] carrying the status and body.
//! - Bodies that are not a chat completion, or have no choices, become
//!   [`MarkerError::InvalidResponse`].

use crate::error::MarkerError;
use crate::prompt::GradingPrompt;
use crate::traits::grader::Grader;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use util::config;

/// Grades submissions with a Large Language Model.
#[derive(Debug, Clone)]
pub struct AiGrader {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

/// Request body for the chat-completions API.
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

/// A single message of the conversation sent to the model.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat-completions API.
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AiGrader {
    /// Builds a grader from the global application config.
    pub fn from_config() -> Result<Self, MarkerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config::llm_timeout_secs()))
            .build()?;

        Ok(Self::with_client(
            client,
            config::llm_api_url(),
            config::llm_api_key(),
            config::llm_model(),
        ))
    }

    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Grader for AiGrader {
    async fn grade(&self, prompt: &GradingPrompt) -> Result<String, MarkerError> {
        if self.api_key.trim().is_empty() {
            return Err(MarkerError::MissingApiKey);
        }

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        tracing::debug!(model = %self.model, url = %self.api_url, "Sending grading request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(MarkerError::Upstream {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let completion = serde_json::from_str::<ChatCompletionResponse>(&response_text)
            .map_err(|e| {
                MarkerError::InvalidResponse(format!(
                    "error decoding response body: {}. Full response: {}",
                    e, response_text
                ))
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| MarkerError::InvalidResponse("reply contained no message".into()))
    }
}
