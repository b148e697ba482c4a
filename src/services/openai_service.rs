use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use crate::services::fallback::ProviderError;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const PLANNER_CHAT_MODEL: &str = "gpt-4";
pub const IMAGE_MODEL: &str = "dall-e-3";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// Thin client for the language-model and image-generation provider.
#[derive(Clone)]
pub struct OpenAiService {
    client: Client,
    api_key: String,
}

impl OpenAiService {
    pub fn new() -> Result<Self, ProviderError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ProviderError::Unavailable("OPENAI_API_KEY not set".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(ProviderError::Unavailable(
                "OPENAI_API_KEY is empty".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Single-turn chat completion. Returns the trimmed message content.
    pub async fn chat_completion(
        &self,
        model: &str,
        system: Option<&str>,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user,
        });

        let request = ChatRequest {
            model,
            messages,
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", OPENAI_BASE_URL))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(ProviderError::Empty(
                "language model returned empty content".to_string(),
            ));
        }
        Ok(content)
    }

    /// Generate a single image and return its hosted URL.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            size: "1024x1024",
            quality: "standard",
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", OPENAI_BASE_URL))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let images: ImageResponse = response.json().await?;
        images
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ProviderError::Empty("no image URL in response".to_string()))
    }
}
