//! The request pipeline: observe weather, ask the model, resolve a tool
//! call, and format the reply.

use anyhow::{Result, bail};
use serde_json::Value;

use crate::{
    model::{RouteRecommendation, WeatherCondition},
    provider::CompletionProvider,
    resolver, tool,
    weather::WeatherProbe,
};

const FAILED_REPLY: &str = "Sorry, I couldn't process your request.";
const EMPTY_REPLY: &str = "No response generated.";

pub struct RequestPipeline {
    weather: WeatherProbe,
    completion: Box<dyn CompletionProvider>,
}

impl RequestPipeline {
    pub fn new(weather: WeatherProbe, completion: Box<dyn CompletionProvider>) -> Self {
        Self {
            weather,
            completion,
        }
    }

    /// Answer a route query for a user starting in `origin_city`.
    pub async fn handle(&self, query: &str, origin_city: &str) -> Result<String> {
        let condition = self.weather.observe(origin_city).await;
        self.handle_with_condition(query, origin_city, condition).await
    }

    /// Same as [`RequestPipeline::handle`], with the observation already made.
    pub async fn handle_with_condition(
        &self,
        query: &str,
        origin_city: &str,
        condition: WeatherCondition,
    ) -> Result<String> {
        let prompt =
            format!("User asks: {query}. Current weather is {condition} in {origin_city}.");
        let tools = [tool::route_tool_schema()];

        let response = self.completion.complete(&prompt, &tools).await;
        if response.choices.is_empty() {
            return Ok(FAILED_REPLY.to_string());
        }

        let Some(mut call) = resolver::resolve(&response) else {
            let content = response.choices[0].message.content.as_deref().unwrap_or_default();
            return Ok(if content.is_empty() {
                EMPTY_REPLY.to_string()
            } else {
                content.to_string()
            });
        };

        // The model's weather guess is never trusted; the observation wins.
        call.arguments.insert(
            "weather_condition".to_string(),
            Value::String(condition.as_str().to_string()),
        );

        match tool::dispatch(&call) {
            Ok(recommendation) => Ok(format_reply(condition, recommendation)),
            Err(payload) => bail!("tool dispatch failed: {payload}"),
        }
    }
}

fn format_reply(condition: WeatherCondition, rec: &RouteRecommendation) -> String {
    let mut reply = format!(
        "**Weather:** {}\n**Recommendation:** {}\n\n**Options:**",
        condition.capitalized(),
        rec.recommendation
    );

    for route in rec.routes {
        reply.push_str(&format!(
            "\n- {}: {} ({})",
            title_case(route.kind),
            route.duration,
            route.details
        ));
    }

    reply
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
