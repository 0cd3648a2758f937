use async_trait::async_trait;
use thiserror::Error;

pub mod chunk;
pub mod mymemory;
pub mod openai;

pub use mymemory::MyMemoryTranslator;
pub use openai::OpenAiTranslator;

/// Upstream translation failure. `status_code` is the provider's HTTP
/// status, or 0 when no response was received at all.
#[derive(Debug, Error)]
#[error("provider returned {status_code}: {message}")]
pub struct ProviderError {
    pub status_code: u16,
    pub message: String,
}

impl ProviderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            message: message.into(),
        }
    }
}

/// One text-translation backend. A single call translates a single chunk;
/// retries and chunk splitting/merging happen upstream. Callers guarantee
/// non-empty text and a validated language pair.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;
}
