use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use super::model::{JobStatus, TranslationJob};

#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct QueueStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

/// In-memory job records. Reads clone the record out and writes replace it
/// wholesale under the lock, so a concurrent status() can observe the old
/// or the new record but never a torn one. After submission only the
/// worker owning a job mutates it.
#[derive(Clone, Default)]
pub struct JobStore {
    inner: Arc<RwLock<HashMap<Uuid, TranslationJob>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, job: TranslationJob) {
        self.inner.write().await.insert(job.id, job);
    }

    pub async fn get(&self, id: Uuid) -> Option<TranslationJob> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn pending_count(&self) -> usize {
        self.inner
            .read()
            .await
            .values()
            .filter(|j| j.status == JobStatus::Pending)
            .count()
    }

    /// Transitions a pending job to processing, clears its queue position
    /// and shifts the remaining pending jobs up one rank. Returns the
    /// updated record, or None when the job vanished (expired and swept).
    pub async fn mark_processing(&self, id: Uuid) -> Option<TranslationJob> {
        let mut jobs = self.inner.write().await;

        let job = jobs.get(&id)?;
        if job.status != JobStatus::Pending {
            return None;
        }

        let mut updated = job.clone();
        updated.status = JobStatus::Processing;
        updated.position = None;
        jobs.insert(id, updated.clone());

        for other in jobs.values_mut() {
            if other.id != id && other.status == JobStatus::Pending {
                if let Some(pos) = other.position {
                    other.position = Some(pos.saturating_sub(1).max(1));
                }
            }
        }

        Some(updated)
    }

    /// Replaces a job record with its terminal state.
    pub async fn finish(&self, job: TranslationJob) {
        debug_assert!(job.status.is_terminal());
        self.inner.write().await.insert(job.id, job);
    }

    pub async fn stats(&self) -> QueueStats {
        let jobs = self.inner.read().await;
        let mut stats = QueueStats {
            total: jobs.len(),
            ..QueueStats::default()
        };
        for job in jobs.values() {
            match job.status {
                JobStatus::Pending => stats.pending += 1,
                JobStatus::Processing => stats.processing += 1,
                JobStatus::Completed => stats.completed += 1,
                JobStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }

    /// Drops records past their retention window. Returns how many were
    /// removed.
    pub async fn remove_expired(&self, now: OffsetDateTime) -> usize {
        let mut jobs = self.inner.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| !job.is_expired(now));
        before - jobs.len()
    }
}
