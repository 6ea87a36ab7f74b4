use crate::{
    config::Config,
    error::CompletionError,
    model::CompletionResponse,
    provider::{mistral::MistralProvider, openai::OpenAiProvider},
    tool::ToolSchema,
};
use async_trait::async_trait;
use serde::Serialize;
use std::{convert::TryFrom, fmt::Debug, time::Duration};
use tracing::warn;

pub mod mistral;
pub mod openai;

/// Bounded request timeout for completion calls.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Mistral,
    OpenAi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Mistral => "mistral",
            ProviderId::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn key_var(&self) -> &'static str {
        match self {
            ProviderId::Mistral => "MISTRAL_API_KEY",
            ProviderId::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Model used when the configuration does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::Mistral => "mistral-small-latest",
            ProviderId::OpenAi => "gpt-3.5-turbo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Mistral, ProviderId::OpenAi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "mistral" => Ok(ProviderId::Mistral),
            "openai" => Ok(ProviderId::OpenAi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: mistral, openai."
            )),
        }
    }
}

/// One chat turn against a completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Send `prompt` as a single user message, advertising `tools`.
    async fn try_complete(
        &self,
        prompt: &str,
        tools: &[ToolSchema],
    ) -> Result<CompletionResponse, CompletionError>;

    /// Absorbing wrapper: transport failures become an empty response, so
    /// callers treat "no choices" as "no answer" instead of an exception.
    async fn complete(&self, prompt: &str, tools: &[ToolSchema]) -> CompletionResponse {
        match self.try_complete(prompt, tools).await {
            Ok(response) => response,
            Err(err) => {
                warn!("completion request failed: {}", err);
                CompletionResponse::empty()
            }
        }
    }
}

/// Wire body shared by the chat-completions backends.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatRequestMessage<'a>>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [ToolSchema]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequestMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn CompletionProvider>> {
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: set the {} environment variable.",
            id.key_var()
        )
    })?;

    let model = config.model_for(id);
    let temperature = config.temperature;

    let boxed: Box<dyn CompletionProvider> = match id {
        ProviderId::Mistral => {
            Box::new(MistralProvider::new(api_key.to_owned(), model, temperature))
        }
        ProviderId::OpenAi => {
            Box::new(OpenAiProvider::new(api_key.to_owned(), model, temperature))
        }
    };

    Ok(boxed)
}

/// Construct the configured provider, using the `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn CompletionProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
