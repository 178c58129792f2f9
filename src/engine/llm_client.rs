use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::settings::LlmSettings;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    pub content: String,
}

/// Failures of the call itself, kept distinct from malformed completion
/// *content* (which is never an error; the normalizer absorbs it).
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("completion contained no choices")]
    EmptyCompletion,
}

/// Blocking client for any OpenAI-compatible chat-completions endpoint.
pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn update_settings(&mut self, settings: LlmSettings) {
        self.settings = settings;
    }

    fn base_url(&self) -> String {
        self.settings
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// One synchronous completion call. Returns the model's raw text.
    pub fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let req = ChatCompletionRequest {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            messages,
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url()))
            .json(&req);

        let api_key = self.settings.resolved_api_key();
        if !api_key.is_empty() {
            request = request.bearer_auth(api_key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let parsed = response.json::<ChatCompletionResponse>()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }

    /// Quick reachability probe against the provider's model listing.
    pub fn test_connection(&self) -> anyhow::Result<String> {
        let mut request = self.client.get(format!("{}/models", self.base_url()));

        let api_key = self.settings.resolved_api_key();
        if !api_key.is_empty() {
            request = request.bearer_auth(api_key);
        }

        let resp: serde_json::Value = request.send()?.json()?;

        Ok(format!(
            "Connected ({} models available)",
            resp["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }
}
