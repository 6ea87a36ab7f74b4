//! Normalizes a completion response into at most one tool call.

use crate::model::{CompletionResponse, ToolCall};

/// The first tool call requested by the first choice, if any. Later tool
/// calls in the same message are dropped; provider-supplied order breaks
/// the tie.
pub fn resolve(response: &CompletionResponse) -> Option<ToolCall> {
    let message = &response.choices.first()?.message;
    let payload = message.tool_calls.as_ref()?.first()?;

    Some(ToolCall {
        name: payload.function.name.clone(),
        arguments: payload.function.arguments.clone().into_map(),
    })
}
