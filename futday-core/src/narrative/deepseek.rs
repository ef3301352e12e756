//! DeepSeek chat-completions client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{GenerateError, TextGenerator};

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Low temperature: report prose must track the supplied figures, not
/// improvise around them.
const TEMPERATURE: f64 = 0.2;
const MAX_TOKENS: u32 = 1200;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Blocking DeepSeek chat client.
pub struct DeepSeekClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl DeepSeekClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn extract_content(resp: ChatResponse) -> Result<String, GenerateError> {
        let content = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::MalformedResponse("no choices".into()))?
            .message
            .content;
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(GenerateError::EmptyCompletion);
        }
        Ok(content)
    }
}

impl TextGenerator for DeepSeekClient {
    fn name(&self) -> &str {
        "deepseek"
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GenerateError::Api {
                status: status.as_u16(),
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;
        Self::extract_content(parsed)
    }
}
