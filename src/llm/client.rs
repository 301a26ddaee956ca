//! Hosted model API client.
//!
//! One HTTP POST per generation, no retries, no streaming. Supports the
//! Gemini `generateContent` API, OpenAI chat completions and Anthropic
//! messages; the provider is picked from the configured model name.

use crate::config::{LlmProvider, LlmSettings};
use crate::otel::{llm_span, record_llm_response};
use crate::types::{IntelliSqlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::Instrument;

/// Anything that turns an instruction plus a question into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `user_prompt` under `system_prompt`.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Human-readable model label (e.g. "Google Gemini gemini-2.5-flash").
    fn label(&self) -> String;
}

/// Gemini `generateContent` response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

/// OpenAI chat completions response.
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Anthropic messages response.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Debug, Deserialize)]
struct GeminiModel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Minimal LLM API client.
pub struct LlmClient {
    provider: LlmProvider,
    model: String,
    api_key: String,
    base_url: String,
    temperature: f32,
    client: Client,
}

impl LlmClient {
    /// Create a client from settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is empty or the HTTP client
    /// cannot be built
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let provider = settings.provider();
        if settings.api_key.trim().is_empty() {
            return Err(IntelliSqlError::config(format!(
                "{} environment variable not set",
                provider.api_key_var()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| IntelliSqlError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            provider,
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            base_url: settings.base_url(),
            temperature: settings.temperature,
            client,
        })
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// List model names available to the configured key.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let request = match self.provider {
            LlmProvider::Gemini => self
                .client
                .get(format!("{}/models", self.base_url))
                .header("x-goog-api-key", &self.api_key),
            LlmProvider::OpenAI => self
                .client
                .get(format!("{}/models", self.base_url))
                .bearer_auth(&self.api_key),
            LlmProvider::Anthropic => self
                .client
                .get(format!("{}/models", self.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01"),
        };

        let body = self.send(request).await?;

        match self.provider {
            LlmProvider::Gemini => {
                let parsed: GeminiModelList = serde_json::from_str(&body).map_err(|e| {
                    IntelliSqlError::llm(format!("Failed to parse model list: {}", e))
                })?;
                Ok(parsed.models.into_iter().map(|m| m.name).collect())
            }
            LlmProvider::OpenAI | LlmProvider::Anthropic => {
                let parsed: ModelList = serde_json::from_str(&body).map_err(|e| {
                    IntelliSqlError::llm(format!("Failed to parse model list: {}", e))
                })?;
                Ok(parsed.data.into_iter().map(|m| m.id).collect())
            }
        }
    }

    /// Call Gemini `generateContent`; instruction and question go as two parts
    /// of one user turn.
    async fn call_gemini(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };

        let request = self
            .client
            .post(format!("{}/{}:generateContent", self.base_url, model_path))
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [
                    {
                        "role": "user",
                        "parts": [
                            {"text": system_prompt},
                            {"text": user_prompt}
                        ]
                    }
                ],
                "generationConfig": {"temperature": self.temperature}
            }));

        let body = self.send(request).await?;
        parse_gemini(&body)
    }

    /// Call OpenAI chat completions.
    async fn call_openai(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": self.temperature
            }));

        let body = self.send(request).await?;
        parse_openai(&body)
    }

    /// Call Anthropic messages.
    async fn call_anthropic(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": 1024,
                "system": system_prompt,
                "messages": [
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": self.temperature
            }));

        let body = self.send(request).await?;
        parse_anthropic(&body)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request.send().await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IntelliSqlError::llm(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(IntelliSqlError::llm(format!(
                "{} API error {}: {}",
                self.provider.display_name(),
                status,
                body
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let system = match self.provider {
            LlmProvider::Gemini => "gemini",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Anthropic => "anthropic",
        };
        let span = llm_span(system, &self.model);

        async {
            let text = match self.provider {
                LlmProvider::Gemini => self.call_gemini(system_prompt, user_prompt).await,
                LlmProvider::OpenAI => self.call_openai(system_prompt, user_prompt).await,
                LlmProvider::Anthropic => self.call_anthropic(system_prompt, user_prompt).await,
            }?;
            record_llm_response(text.len());
            tracing::debug!(response = %text, "Model raw response");
            Ok::<_, IntelliSqlError>(text)
        }
        .instrument(span)
        .await
    }

    fn label(&self) -> String {
        format!("{} {}", self.provider.display_name(), self.model)
    }
}

fn parse_gemini(body: &str) -> Result<String> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| IntelliSqlError::llm(format!("Failed to parse Gemini response: {}", e)))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(IntelliSqlError::llm(format!("Gemini blocked the prompt: {}", reason)));
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| IntelliSqlError::llm("No response from Gemini"))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(IntelliSqlError::llm(format!(
            "Gemini returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

fn parse_openai(body: &str) -> Result<String> {
    let parsed: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| IntelliSqlError::llm(format!("Failed to parse OpenAI response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| IntelliSqlError::llm("No response from OpenAI"))
}

fn parse_anthropic(body: &str) -> Result<String> {
    let parsed: AnthropicResponse = serde_json::from_str(body)
        .map_err(|e| IntelliSqlError::llm(format!("Failed to parse Anthropic response: {}", e)))?;

    let text: String = parsed.content.into_iter().filter_map(|c| c.text).collect();
    if text.is_empty() {
        return Err(IntelliSqlError::llm("No response from Anthropic"));
    }
    Ok(text)
}
