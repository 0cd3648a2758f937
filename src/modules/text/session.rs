use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::TranslationRecord;

/// Most recent entries shown to a client.
pub const HISTORY_DISPLAY_LIMIT: usize = 10;

/// Hard cap on retained entries per session.
const HISTORY_RETAIN_LIMIT: usize = 50;

/// Explicitly scoped per-client translation history. Sessions are created
/// and cleared through the API; nothing here outlives the process.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, VecDeque<TranslationRecord>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, VecDeque::new());
        id
    }

    /// Prepends a record to the session's history, newest first. Returns
    /// false when the session does not exist.
    pub async fn record(&self, session_id: Uuid, record: TranslationRecord) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&session_id) {
            Some(history) => {
                history.push_front(record);
                history.truncate(HISTORY_RETAIN_LIMIT);
                true
            }
            None => false,
        }
    }

    /// Up to HISTORY_DISPLAY_LIMIT entries, newest first. None when the
    /// session does not exist.
    pub async fn history(&self, session_id: Uuid) -> Option<Vec<TranslationRecord>> {
        self.inner
            .read()
            .await
            .get(&session_id)
            .map(|h| h.iter().take(HISTORY_DISPLAY_LIMIT).cloned().collect())
    }

    /// Empties the session's history, keeping the session alive. Returns
    /// false when the session does not exist.
    pub async fn clear(&self, session_id: Uuid) -> bool {
        match self.inner.write().await.get_mut(&session_id) {
            Some(history) => {
                history.clear();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn record(n: usize) -> TranslationRecord {
        TranslationRecord {
            id: Uuid::new_v4(),
            source_text: format!("source {n}"),
            translated_text: format!("translated {n}"),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn history_is_newest_first_and_display_capped() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;

        for n in 0..15 {
            assert!(registry.record(id, record(n)).await);
        }

        let history = registry.history(id).await.unwrap();
        assert_eq!(history.len(), HISTORY_DISPLAY_LIMIT);
        assert_eq!(history[0].source_text, "source 14");
        assert_eq!(history[9].source_text, "source 5");
    }

    #[tokio::test]
    async fn clear_empties_but_keeps_the_session() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        registry.record(id, record(0)).await;

        assert!(registry.clear(id).await);
        assert_eq!(registry.history(id).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn unknown_session_is_reported() {
        let registry = SessionRegistry::new();
        assert!(!registry.record(Uuid::new_v4(), record(0)).await);
        assert!(registry.history(Uuid::new_v4()).await.is_none());
        assert!(!registry.clear(Uuid::new_v4()).await);
    }
}
