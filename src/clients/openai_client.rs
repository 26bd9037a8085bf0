use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReflectionError;
use crate::service::reflection_service::LanguageModelClient;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const SYSTEM_MESSAGE: &str = "You write short, gentle reflections about time and life. Reply with plain text only (no JSON, no markdown, no quotes).";

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAIClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ReflectionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model: model.unwrap_or(DEFAULT_OPENAI_MODEL.to_string()),
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_MESSAGE.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: 300,
            temperature: 0.8,
            top_p: 0.9,
        }
    }
}

fn parse_response(body: &str) -> Result<String, ReflectionError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    let choice = parsed.choices.into_iter().next().ok_or(ReflectionError::Empty)?;
    Ok(choice.message.content.unwrap_or_default())
}

#[async_trait]
impl LanguageModelClient for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String, ReflectionError> {
        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?; // read the body once
        if !status.is_success() {
            debug!(status = status.as_u16(), body = %text, "openai returned an error");
            return Err(ReflectionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        parse_response(&text)
    }
}
