use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, TranslationProvider};

/// Plain-text translation via the MyMemory HTTP API. Used by the text tab;
/// keyed by `q` and `langpair` (`src|tgt`).
pub struct MyMemoryTranslator {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseStatus")]
    response_status: i64,
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
}

#[derive(Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl MyMemoryTranslator {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[
                ("q", text),
                ("langpair", &format!("{source_lang}|{target_lang}")),
            ])
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

        let parsed: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(format!("malformed response: {e}")))?;

        if parsed.response_status != 200 {
            return Err(ProviderError {
                status_code: parsed.response_status.try_into().unwrap_or(0),
                message: "translation rejected by provider".to_string(),
            });
        }

        parsed
            .response_data
            .map(|d| d.translated_text)
            .ok_or_else(|| ProviderError::transport("response carried no translation"))
    }
}
