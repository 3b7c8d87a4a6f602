//! Remote LLM realm namer.
//!
//! Speaks both the Anthropic messages API and OpenAI-compatible chat
//! completions. The format is picked from the endpoint URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use serde::{Deserialize, Serialize};
use tracing::debug;

use game_core::{BiomeKind, RealmDetails};

use crate::api::{ProviderError, RealmDetailsProvider};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 256;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const SYSTEM_PROMPT: &str = "You name places in a procedurally generated world. \
Answer with a single JSON object with the keys \"name\" and \"description\".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

impl ApiFormat {
    pub fn detect(url: &str) -> Self {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAI
        }
    }
}

/// Endpoint credentials. Reading them from the environment is the caller's job.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl LlmConfig {
    pub const DEFAULT_API_URL: &'static str = "https://api.anthropic.com/v1/messages";
    pub const DEFAULT_MODEL: &'static str = "claude-3-haiku-20240307";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: Self::DEFAULT_API_URL.into(),
            model: Self::DEFAULT_MODEL.into(),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

pub struct LlmDetailsProvider {
    client: Client,
    config: LlmConfig,
    format: ApiFormat,
}

impl LlmDetailsProvider {
    pub fn new(config: LlmConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured("api key"));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let format = ApiFormat::detect(&config.api_url);
        Ok(Self {
            client,
            config,
            format,
        })
    }

    pub fn format(&self) -> &ApiFormat {
        &self.format
    }

    async fn complete(&self, prompt: String) -> Result<String, ProviderError> {
        match self.format {
            ApiFormat::Anthropic => self.complete_anthropic(prompt).await,
            ApiFormat::OpenAI => self.complete_openai(prompt).await,
        }
    }

    async fn complete_anthropic(&self, prompt: String) -> Result<String, ProviderError> {
        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT.into(),
            messages: vec![Message {
                role: "user".into(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let completion: AnthropicResponse = checked(response).await?.json().await?;
        completion
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| ProviderError::Malformed("empty response".into()))
    }

    async fn complete_openai(&self, prompt: String) -> Result<String, ProviderError> {
        let request = OpenAIRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user".into(),
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let completion: OpenAIResponse = checked(response).await?.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Malformed("empty response".into()))
    }
}

#[async_trait]
impl RealmDetailsProvider for LlmDetailsProvider {
    async fn realm_details(
        &self,
        level: u32,
        biome: BiomeKind,
    ) -> Result<RealmDetails, ProviderError> {
        let text = self.complete(prompt(level, biome)).await?;
        debug!(
            target: "runtime::providers",
            level,
            %biome,
            chars = text.len(),
            "llm answered"
        );
        parse_details(&text)
    }
}

fn prompt(level: u32, biome: BiomeKind) -> String {
    format!(
        "Generate a unique name and a short eerie description for a level {level} \
         {biome} realm in a dark fantasy lost world. Respond with JSON only."
    )
}

/// Maps 429 and other non-success statuses to provider errors.
async fn checked(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        return Err(ProviderError::RateLimited { retry_after });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

#[derive(Deserialize)]
struct DetailsPayload {
    name: String,
    description: String,
}

/// Pulls the first `{` .. last `}` span out of free text and reads it as details.
fn parse_details(text: &str) -> Result<RealmDetails, ProviderError> {
    let start = text.find('{');
    let end = text.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => return Err(ProviderError::Malformed("no JSON object in response".into())),
    };

    let payload: DetailsPayload =
        serde_json::from_str(json).map_err(|error| ProviderError::Malformed(error.to_string()))?;
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ProviderError::Malformed("empty realm name".into()));
    }
    Ok(RealmDetails::new(name, payload.description.trim()))
}

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}
