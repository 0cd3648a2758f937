use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::model::TranslationRecord;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextRequest {
    pub session_id: Uuid,
    #[validate(length(min = 1, max = 5000, message = "text must be 1 to 5000 characters"))]
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextResponse {
    pub translated_text: String,
    pub record_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
}

impl From<TranslationRecord> for HistoryEntry {
    fn from(record: TranslationRecord) -> Self {
        Self {
            id: record.id,
            source_text: record.source_text,
            translated_text: record.translated_text,
            source_lang: record.source_lang,
            target_lang: record.target_lang,
            timestamp: record.created_at.unix_timestamp(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub entries: Vec<HistoryEntry>,
}
