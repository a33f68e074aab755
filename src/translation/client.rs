use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;

use super::error::TranslationError;
use super::prompt::build_system_prompt;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_TOKENS: u32 = 50;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// One word to translate, with its optional context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Raw cell value, sent to the provider verbatim.
    pub word: String,
    pub source_language: String,
    pub target_language: String,
    /// Empty when there is no context column or the cell is blank.
    pub context: String,
}

/// Anything that can turn a [`TranslationRequest`] into translated text.
///
/// The batch loop only talks to this trait, so tests can script responses
/// without a network.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError>;
}

/// Connection and sampling settings for [`TranslationClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Non-streaming client for OpenAI-compatible chat completion endpoints.
pub struct TranslationClient {
    client: Client,
    settings: ClientSettings,
}

impl TranslationClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, settings })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.settings.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Translator for TranslationClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        let url = self.completions_url();

        let system_prompt = build_system_prompt(
            &request.source_language,
            &request.target_language,
            &request.context,
        );

        let chat_request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(&request.word),
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = &self.settings.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        tracing::debug!(%url, word = %request.word, "sending translation request");

        let response = http_request
            .send()
            .await
            .map_err(|e| TranslationError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranslationError::Network(format!("Failed to read response body: {e}")))?;

        if status != StatusCode::OK {
            return Err(TranslationError::Provider {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        parse_completion(&body)
    }
}

/// Extracts `error.message` from a provider error body, falling back to the raw body.
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| body.trim().to_string(), |envelope| envelope.error.message)
}

/// Extracts and trims `choices[0].message.content` from a successful response body.
fn parse_completion(body: &str) -> Result<String, TranslationError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| TranslationError::MalformedResponse(format!("invalid JSON: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            TranslationError::MalformedResponse(
                "missing choices[0].message.content".to_string(),
            )
        })
}
