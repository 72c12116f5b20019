/// LLM Client: the single point of entry for all completion-gateway calls.
///
/// ARCHITECTURAL RULE: No other module may call the gateway directly.
/// All LLM interactions MUST go through this module.
///
/// Every call forces a single tool call so the answer arrives as JSON arguments
/// rather than free text. One attempt per call; callers own the failure policy.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// OpenAI-compatible chat-completions endpoint used when `LLM_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
/// The model used for all scoring calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "google/gemini-3-flash-preview";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM response did not contain a call to tool '{0}'")]
    MissingToolCall(String),
}

/// A function tool the model is forced to call. `parameters` is a JSON Schema.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    tools: Vec<ToolSpec<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolSpec<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    function: FunctionSpec<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionSpec<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    function: ToolChoiceFunction<'a>,
}

#[derive(Debug, Serialize)]
struct ToolChoiceFunction<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    /// Absent or `null` when the model answered in plain text.
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, as a string.
    pub arguments: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Returns the arguments of the first tool call, preferring one named `tool`.
    pub fn tool_arguments(&self, tool: &str) -> Option<&str> {
        let calls = self.choices.first()?.message.tool_calls.as_deref()?;
        calls
            .iter()
            .find(|c| c.function.name == tool)
            .or_else(|| calls.first())
            .map(|c| c.function.arguments.as_str())
    }
}

/// The LLM client shared by all scoring paths.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
        })
    }

    /// Makes one call to the gateway, forcing `tool`, and returns the raw response.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        tool: &ToolDefinition,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            tools: vec![ToolSpec {
                kind: "function",
                function: FunctionSpec {
                    name: tool.name,
                    description: tool.description,
                    parameters: &tool.parameters,
                },
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction { name: tool.name },
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM gateway returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat: ChatResponse = serde_json::from_slice(&response.bytes().await?)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }

    /// Calls the gateway and deserializes the forced tool call's arguments as `T`.
    pub async fn call_tool<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        tool: &ToolDefinition,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system, tool).await?;
        parse_tool_arguments(&response, tool.name)
    }
}

fn parse_tool_arguments<T: DeserializeOwned>(
    response: &ChatResponse,
    tool: &str,
) -> Result<T, LlmError> {
    let arguments = response
        .tool_arguments(tool)
        .ok_or_else(|| LlmError::MissingToolCall(tool.to_string()))?;
    serde_json::from_str(arguments).map_err(LlmError::Parse)
}
