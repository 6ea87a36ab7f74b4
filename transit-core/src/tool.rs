//! The callable tool advertised to completion providers, and dispatch of
//! resolved calls.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    catalog,
    model::{RouteRecommendation, ToolCall, WeatherCondition},
};

pub const ROUTE_TOOL_NAME: &str = "get_weather_based_route";

/// Callable-tool envelope in the chat-completions wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionSchema,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Schema for the single registered tool.
pub fn route_tool_schema() -> ToolSchema {
    ToolSchema {
        kind: "function",
        function: FunctionSchema {
            name: ROUTE_TOOL_NAME,
            description: "Get optimal transportation route based on current weather conditions",
            parameters: json!({
                "type": "object",
                "properties": {
                    "origin": {
                        "type": "string",
                        "description": "Starting location, e.g. Helsinki Central Station"
                    },
                    "destination": {
                        "type": "string",
                        "description": "Destination location, e.g. Helsinki Airport"
                    },
                    "weather_condition": {
                        "type": "string",
                        "enum": ["sunny", "rainy", "snowy", "windy", "foggy"],
                        "description": "Current weather condition"
                    }
                },
                "required": ["origin", "destination", "weather_condition"]
            }),
        },
    }
}

/// Dispatch a resolved call by name. Unrecognized names come back as a
/// structured error payload, not a panic or an exception.
pub fn dispatch(call: &ToolCall) -> Result<&'static RouteRecommendation, Value> {
    match call.name.as_str() {
        ROUTE_TOOL_NAME => {
            let origin = arg_str(call, "origin");
            let destination = arg_str(call, "destination");
            let condition = WeatherCondition::parse(arg_str(call, "weather_condition"));
            // origin/destination do not affect selection; the catalog is
            // keyed by weather alone.
            debug!(
                "routing {} -> {} in {} weather",
                origin, destination, condition
            );
            Ok(catalog::lookup(condition))
        }
        other => Err(json!({ "error": format!("Tool {other} not implemented") })),
    }
}

fn arg_str<'a>(call: &'a ToolCall, key: &str) -> &'a str {
    call.arguments.get(key).and_then(Value::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn make_call(name: &str, arguments: Value) -> ToolCall {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        ToolCall {
            name: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn route_tool_dispatches_by_weather() {
        let call = make_call(
            ROUTE_TOOL_NAME,
            json!({
                "origin": "Kamppi",
                "destination": "Helsinki Airport",
                "weather_condition": "snowy"
            }),
        );

        let rec = dispatch(&call).unwrap();
        assert_eq!(rec.routes[0].kind, "metro");
    }

    #[test]
    fn missing_arguments_fall_back_to_default_recommendation() {
        let call = make_call(ROUTE_TOOL_NAME, json!({}));
        let rec = dispatch(&call).unwrap();
        assert_eq!(rec.recommendation, "Multiple options available");
    }

    #[test]
    fn unknown_tool_yields_error_payload() {
        let call = make_call("teleport", json!({}));
        let err = dispatch(&call).unwrap_err();
        assert_eq!(err["error"], "Tool teleport not implemented");
    }

    #[test]
    fn schema_names_the_required_parameters() {
        let schema = route_tool_schema();
        assert_eq!(schema.function.name, ROUTE_TOOL_NAME);

        let required = schema.function.parameters["required"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(required.len(), 3);
        assert!(required.contains(&json!("weather_condition")));
    }
}
