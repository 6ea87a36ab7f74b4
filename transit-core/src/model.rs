use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Coarse weather category driving route selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Sunny,
    Rainy,
    Snowy,
    Windy,
    Foggy,
    Cloudy,
    Stormy,
    Moderate,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Snowy => "snowy",
            WeatherCondition::Windy => "windy",
            WeatherCondition::Foggy => "foggy",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Stormy => "stormy",
            WeatherCondition::Moderate => "moderate",
        }
    }

    /// Capitalized form used in reply headers.
    pub fn capitalized(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Snowy => "Snowy",
            WeatherCondition::Windy => "Windy",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Stormy => "Stormy",
            WeatherCondition::Moderate => "Moderate",
        }
    }

    /// Parse the wire word; anything unrecognized counts as moderate.
    pub fn parse(value: &str) -> Self {
        match value {
            "sunny" => WeatherCondition::Sunny,
            "rainy" => WeatherCondition::Rainy,
            "snowy" => WeatherCondition::Snowy,
            "windy" => WeatherCondition::Windy,
            "foggy" => WeatherCondition::Foggy,
            "cloudy" => WeatherCondition::Cloudy,
            "stormy" => WeatherCondition::Stormy,
            _ => WeatherCondition::Moderate,
        }
    }

    pub const fn all() -> &'static [WeatherCondition] {
        &[
            WeatherCondition::Sunny,
            WeatherCondition::Rainy,
            WeatherCondition::Snowy,
            WeatherCondition::Windy,
            WeatherCondition::Foggy,
            WeatherCondition::Cloudy,
            WeatherCondition::Stormy,
            WeatherCondition::Moderate,
        ]
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate transportation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOption {
    pub kind: &'static str,
    pub duration: &'static str,
    pub details: &'static str,
}

/// Recommendation text plus the route options backing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecommendation {
    pub recommendation: &'static str,
    pub routes: &'static [RouteOption],
}

/// Chat-completions response body. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// The defined transport-failure value: "no choices" means "no answer".
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallPayload>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallPayload {
    pub function: FunctionPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionPayload {
    pub name: String,
    pub arguments: ToolArguments,
}

/// Providers deliver tool arguments either pre-parsed or as a JSON-encoded
/// string. Both shapes deserialize here; [`ToolArguments::into_map`] is the
/// single decode step.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    Parsed(Map<String, Value>),
    Raw(String),
}

impl ToolArguments {
    /// Undecodable raw payloads degrade to no arguments rather than failing
    /// the request.
    pub fn into_map(self) -> Map<String, Value> {
        match self {
            ToolArguments::Parsed(map) => map,
            ToolArguments::Raw(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("failed to decode tool arguments: {}", err);
                Map::new()
            }),
        }
    }
}

/// A tool invocation requested by the model, normalized for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}
