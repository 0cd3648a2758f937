use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ProviderError, TranslationProvider};
use crate::common::lang::AUTO;
use crate::config::settings::AppConfig;

/// Document translation via an OpenAI-compatible chat completions API.
/// One attempt per call; failures propagate to the caller unretried.
pub struct OpenAiTranslator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiTranslator {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }

    fn build_messages(&self, text: &str, source_lang: &str, target_lang: &str) -> Vec<ChatMessage> {
        let source_desc = if source_lang == AUTO {
            "the detected source language".to_string()
        } else {
            source_lang.to_string()
        };

        vec![
            ChatMessage {
                role: "system".to_string(),
                content: format!(
                    "You are a professional translator. Translate the given document \
                     content from {source_desc} to {target_lang}. Preserve all numbers, \
                     codes, references, line breaks, spacing and punctuation exactly. \
                     Keep proper names unchanged. Do not add or remove content. \
                     Respond with the translation only."
                ),
            },
            ChatMessage {
                role: "user".to_string(),
                content: text.to_string(),
            },
        ]
    }
}

#[async_trait]
impl TranslationProvider for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(text, source_lang, target_lang),
            temperature: 0.1,
            max_tokens: 4000,
        };

        debug!(chars = text.len(), model = %self.model, "requesting chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError {
                status_code: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(format!("malformed response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| ProviderError::transport("response contained no choices"))
    }
}
