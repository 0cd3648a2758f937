use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use super::dto::{HistoryEntry, HistoryResponse, SessionResponse, TranslateTextRequest, TranslateTextResponse};
use super::model::TranslationRecord;
use crate::common::error::AppError;
use crate::common::lang;
use crate::state::AppState;

pub struct TextService;

impl TextService {
    pub async fn create_session(state: AppState) -> SessionResponse {
        let session_id = state.sessions.create().await;
        debug!(session_id = %session_id, "text session created");
        SessionResponse { session_id }
    }

    /// Translates a short text through the lightweight provider and
    /// appends the result to the session's history.
    pub async fn translate(
        state: AppState,
        req: TranslateTextRequest,
    ) -> Result<TranslateTextResponse, AppError> {
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        lang::validate_pair(&req.source_lang, &req.target_lang)?;

        let translated_text = state
            .text_provider
            .translate(&req.text, &req.source_lang, &req.target_lang)
            .await?;

        let record = TranslationRecord {
            id: Uuid::new_v4(),
            source_text: req.text,
            translated_text: translated_text.clone(),
            source_lang: req.source_lang,
            target_lang: req.target_lang,
            created_at: OffsetDateTime::now_utc(),
        };
        let record_id = record.id;

        if !state.sessions.record(req.session_id, record).await {
            return Err(AppError::NotFound);
        }

        Ok(TranslateTextResponse {
            translated_text,
            record_id,
        })
    }

    pub async fn history(state: AppState, session_id: Uuid) -> Result<HistoryResponse, AppError> {
        let records = state
            .sessions
            .history(session_id)
            .await
            .ok_or(AppError::NotFound)?;

        Ok(HistoryResponse {
            session_id,
            entries: records.into_iter().map(HistoryEntry::from).collect(),
        })
    }

    pub async fn clear_history(state: AppState, session_id: Uuid) -> Result<(), AppError> {
        if !state.sessions.clear(session_id).await {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
