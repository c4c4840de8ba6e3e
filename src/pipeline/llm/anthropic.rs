//! Anthropic Messages API envelope.

use serde::{Deserialize, Serialize};

use super::types::{Completion, TokenUsage};
use super::LlmError;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    model: Option<String>,
    usage: Option<AnthropicUsage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: Option<u32>,
    output_tokens: Option<u32>,
}

pub(crate) fn request_body<'a>(
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    prompt: &'a str,
) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens,
        system,
        messages: [Message {
            role: "user",
            content: prompt,
        }],
    }
}

/// Decode a Messages API response. Text blocks are concatenated in order.
pub fn parse_response(body: &str) -> Result<Completion, LlmError> {
    let parsed: MessagesResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

    let content: String = parsed
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();

    let usage = parsed
        .usage
        .and_then(|u| TokenUsage::from_parts(u.input_tokens, u.output_tokens, None));

    Ok(Completion {
        content,
        model: parsed.model,
        usage,
    })
}
