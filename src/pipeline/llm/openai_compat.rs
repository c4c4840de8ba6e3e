//! Chat-completions envelope shared by OpenAI and Grok.

use serde::{Deserialize, Serialize};

use super::types::{Completion, TokenUsage};
use super::LlmError;

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

pub(crate) fn request_body<'a>(
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    prompt: &'a str,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        max_tokens,
        messages: [
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
    }
}

/// Decode a chat-completions response; content comes from the first choice.
pub fn parse_response(body: &str) -> Result<Completion, LlmError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default();

    let usage = parsed.usage.and_then(|u| {
        TokenUsage::from_parts(u.prompt_tokens, u.completion_tokens, u.total_tokens)
    });

    Ok(Completion {
        content,
        model: parsed.model,
        usage,
    })
}
