//! Chat-completion client for translating batches of missing units.
//!
//! One request per (file, locale) pair; no retry logic. A transport or decode
//! failure is scoped to the task that issued the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Large batches can take a long time to translate.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60 * 10);

/// A chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
}

/// One message in a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// A chat-completion response body. Only `choices[0].message.content` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    #[serde(rename = "object")]
    pub object_type: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The translation seam: one batch of concatenated unit markup in, one
/// translated markup block out. Implementations must be safe to share across
/// concurrent (file, locale) tasks.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, markup: &str, locale: &str) -> Result<String, Error>;
}

/// Translator backed by an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OpenAiTranslator {
    /// Builds the shared HTTP client with bearer auth and the request timeout.
    pub fn new(
        api_key: &str,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, Error> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| Error::configuration("API key is not a valid header value"))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl TranslationProvider for OpenAiTranslator {
    async fn translate(&self, markup: &str, locale: &str) -> Result<String, Error> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt(locale)),
                ChatMessage::user(user_prompt(locale, markup)),
            ],
            temperature: Some(1.0),
            max_tokens: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        };

        debug!(locale, bytes = markup.len(), "sending translation request");
        let response: ChatResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(Error::EmptyResponse)
    }
}

fn system_prompt(locale: &str) -> String {
    format!(
        "You translate Android string resources into the \"{locale}\" locale. \
         Preserve placeholders such as %1$s and %d, links, markup tags, and any \
         literal formatting tokens exactly as they appear. Do not decorate the \
         reply with any additional text and do not wrap it in a code fence."
    )
}

fn user_prompt(locale: &str, markup: &str) -> String {
    format!("Translate the following entries to the \"{locale}\" locale:\n{markup}")
}
