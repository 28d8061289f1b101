//! OpenAI-compatible chat completions classifier.
//!
//! Sends the whole candidate prompt as one user message behind a fixed system
//! message and returns the assistant's text verbatim. Every failure is reported
//! as [`AppError::Classifier`], which the pipeline treats as fatal.

use crate::{
    error::{AppError, AppResult},
    services::providers::LanguageModelClassifier,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "Você é um especialista em lazer e entretenimento que analisa locais \
baseado em preferências específicas do usuário. Responda apenas com a classificação dos locais, \
sem introduções ou conclusões.";
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiClassifier {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiClassifier {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait::async_trait]
impl LanguageModelClassifier for OpenAiClassifier {
    async fn classify(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.api_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending classification request"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Classifier(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Classifier(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Classifier(format!("failed to parse response: {}", e)))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Classifier("response has no message content".to_string()))?;

        tracing::debug!(
            model = %self.model,
            response_chars = content.len(),
            "Classification response received"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
