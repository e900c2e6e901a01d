//! The external text generator. The pipeline only depends on receiving a
//! text blob that should contain `{"events": [...]}`; everything else about
//! the provider is behind this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GeneratorConfig;
use crate::error::{FinderError, Result};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Port for chat-style completion requests. Implementations return the raw
/// completion text; parsing it is the pipeline's problem.
#[async_trait]
pub trait EventGenerator: Send + Sync {
    /// Fails fast when the provider cannot be called at all (e.g. missing
    /// credential). Checked once per request before any generation work.
    fn check_ready(&self) -> Result<()>;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat<'a>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client. Requests strict JSON output;
/// the model may still ignore that, which is why the extractor cascades.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
    api_key: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl EventGenerator for OpenAiGenerator {
    fn check_ready(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(FinderError::Config(format!("{} not set", API_KEY_ENV)));
        }
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.check_ready()?;
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FinderError::Generator {
                message: format!("provider returned {}: {}", status, body),
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(content.trim().to_string())
    }
}
