//! Async LLM client for commentary and dialogue
//!
//! This is a model-agnostic HTTP client for calling LLM APIs.
//! Supports Anthropic, OpenAI-compatible (DeepSeek, etc) and Ollama chat APIs.
//! The model only writes text from facts the engine already decided;
//! it never influences outcomes.

use crate::core::error::{DugoutError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
    /// Local or self-hosted Ollama `/api/chat`
    Ollama,
}

/// Async LLM client for making API calls
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
    temperature: f32,
    max_tokens: u32,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
            temperature: 0.3,
            max_tokens: 500,
        }
    }

    /// Apply timeout and sampling settings
    pub fn with_options(mut self, timeout: Duration, temperature: f32, max_tokens: u32) -> Result<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DugoutError::LlmError(e.to_string()))?;
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        Ok(self)
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else if url.ends_with("/api/chat") {
            ApiFormat::Ollama
        } else {
            // DeepSeek, OpenAI, and other compatible APIs use OpenAI format
            ApiFormat::OpenAI
        }
    }

    pub fn api_format(&self) -> ApiFormat {
        self.api_format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Create a client from environment variables
    ///
    /// Optional: LLM_API_URL (defaults to Anthropic API)
    /// Required unless the URL is an Ollama endpoint: LLM_API_KEY
    /// Optional: LLM_MODEL (defaults per API format)
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let format = Self::detect_api_format(&api_url);

        let api_key = match std::env::var("LLM_API_KEY") {
            Ok(key) => key,
            Err(_) if format == ApiFormat::Ollama => String::new(),
            Err(_) => return Err(DugoutError::LlmError("LLM_API_KEY not set".into())),
        };

        let default_model = match format {
            ApiFormat::Anthropic => "claude-3-haiku-20240307",
            ApiFormat::OpenAI => "gpt-4o-mini",
            ApiFormat::Ollama => "llama3",
        };
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| default_model.into());

        Ok(Self::new(api_key, api_url, model))
    }

    /// Send a completion request to the LLM
    ///
    /// # Arguments
    /// * `system` - System prompt setting the narrator's role
    /// * `user` - Structured game facts to narrate
    ///
    /// # Returns
    /// The LLM's text response
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
            ApiFormat::Ollama => self.complete_ollama(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DugoutError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DugoutError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| DugoutError::LlmError(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| DugoutError::LlmError("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DugoutError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DugoutError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| DugoutError::LlmError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DugoutError::LlmError("Empty response".into()))
    }

    async fn complete_ollama(&self, system: &str, user: &str) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            stream: false,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
            options: OllamaOptions {
                temperature: self.temperature,
                top_p: 0.9,
                num_predict: self.max_tokens,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DugoutError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DugoutError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: OllamaResponse = response
            .json()
            .await
            .map_err(|e| DugoutError::LlmError(e.to_string()))?;

        Ok(completion.message.content)
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
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

// OpenAI-compatible API format (DeepSeek, OpenAI, etc.)
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
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

// Ollama chat format
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    stream: bool,
    messages: Vec<Message>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: ChoiceMessage,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LlmClient::new(
            "test-key".into(),
            "https://api.example.com".into(),
            "test-model".into(),
        );
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_url, "https://api.example.com");
        assert_eq!(client.model(), "test-model");
        assert_eq!(client.api_format(), ApiFormat::OpenAI);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            LlmClient::detect_api_format("https://api.anthropic.com/v1/messages"),
            ApiFormat::Anthropic
        );
        assert_eq!(
            LlmClient::detect_api_format("http://localhost:11434/api/chat"),
            ApiFormat::Ollama
        );
        assert_eq!(
            LlmClient::detect_api_format("https://api.deepseek.com/chat/completions"),
            ApiFormat::OpenAI
        );
    }

    #[test]
    fn test_ollama_request_shape() {
        let request = OllamaRequest {
            model: "llama3".into(),
            stream: false,
            messages: vec![Message {
                role: "user".into(),
                content: "hi".into(),
            }],
            options: OllamaOptions {
                temperature: 0.3,
                top_p: 0.9,
                num_predict: 500,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 500);
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = LlmClient::from_env();
        // Should fail if LLM_API_KEY is not set and the URL needs one
        let needs_key = std::env::var("LLM_API_URL")
            .map(|url| LlmClient::detect_api_format(&url) != ApiFormat::Ollama)
            .unwrap_or(true);
        if std::env::var("LLM_API_KEY").is_err() && needs_key {
            assert!(result.is_err());
        }
    }
}
