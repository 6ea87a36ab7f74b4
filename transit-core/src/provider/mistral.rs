use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::CompletionError,
    model::CompletionResponse,
    provider::{ChatRequest, ChatRequestMessage, REQUEST_TIMEOUT, truncate_body},
    tool::ToolSchema,
};

use super::CompletionProvider;

const BASE_URL: &str = "https://api.mistral.ai/v1";

#[derive(Debug, Clone)]
pub struct MistralProvider {
    api_key: String,
    model: String,
    temperature: f32,
    http: Client,
}

impl MistralProvider {
    pub fn new(api_key: String, model: String, temperature: f32) -> Self {
        Self {
            api_key,
            model,
            temperature,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for MistralProvider {
    async fn try_complete(
        &self,
        prompt: &str,
        tools: &[ToolSchema],
    ) -> Result<CompletionResponse, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatRequestMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            tools: (!tools.is_empty()).then_some(tools),
            tool_choice: None,
        };

        let res = self
            .http
            .post(format!("{BASE_URL}/chat/completions"))
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        res.json::<CompletionResponse>()
            .await
            .map_err(|err| CompletionError::InvalidResponse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn request_body_carries_the_tool_schema() {
        let tools = [crate::tool::route_tool_schema()];
        let body = ChatRequest {
            model: ProviderId::Mistral.default_model(),
            messages: vec![ChatRequestMessage {
                role: "user",
                content: "How do I get to the airport?",
            }],
            temperature: 0.7,
            tools: Some(&tools),
            tool_choice: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "mistral-small-latest");
        assert_eq!(json["tools"][0]["type"], "function");
        assert_eq!(json["tools"][0]["function"]["name"], "get_weather_based_route");
    }
}
