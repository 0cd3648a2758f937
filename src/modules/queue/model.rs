use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

/// Jobs are retained for 48 hours after submission; past that, status and
/// download both report NotFound even if the record still exists.
pub const JOB_RETENTION_HOURS: i64 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One accepted input file. Immutable after submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobFile {
    pub original_name: String,
    pub size_bytes: u64,
    pub storage_ref: String,
}

/// Per-file result, populated only when the job completes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileOutput {
    pub translated_name: String,
    pub storage_ref: String,
    pub elements_translated: usize,
    pub processing_time_seconds: f64,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranslationJob {
    pub id: Uuid,
    pub files: Vec<JobFile>,
    pub glossary: Option<JobFile>,
    pub source_lang: String,
    pub target_lang: String,
    pub status: JobStatus,
    /// Queue rank while pending; cleared once processing starts.
    pub position: Option<usize>,
    /// Fixed at submission, never recomputed.
    pub estimated_seconds: u64,
    #[schema(value_type = i64)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = i64)]
    pub expires_at: OffsetDateTime,
    pub outputs: Vec<FileOutput>,
    pub error: Option<String>,
}

impl TranslationJob {
    pub fn new(
        id: Uuid,
        files: Vec<JobFile>,
        glossary: Option<JobFile>,
        source_lang: String,
        target_lang: String,
        position: usize,
    ) -> Self {
        let created_at = OffsetDateTime::now_utc();
        let total_bytes: u64 = files.iter().map(|f| f.size_bytes).sum();
        let estimated_seconds = estimate_seconds(total_bytes, files.len());

        Self {
            id,
            files,
            glossary,
            source_lang,
            target_lang,
            status: JobStatus::Pending,
            position: Some(position),
            estimated_seconds,
            created_at,
            expires_at: created_at + Duration::hours(JOB_RETENTION_HOURS),
            outputs: Vec::new(),
            error: None,
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

/// User-facing ETA: 30 seconds per MB with a 30 second floor, plus 15
/// seconds of per-file parsing overhead. A crude linear model with no
/// feedback from observed processing times.
pub fn estimate_seconds(total_bytes: u64, file_count: usize) -> u64 {
    let size_mb = total_bytes as f64 / (1024.0 * 1024.0);
    let base = (size_mb * 30.0).max(30.0);
    (base + file_count as f64 * 15.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_is_linear_in_size_and_count() {
        // 3 MB + 5 MB across two files: max(30, 8*30) + 2*15 = 270.
        let total = 8 * 1024 * 1024;
        assert_eq!(estimate_seconds(total, 2), 270);
    }

    #[test]
    fn estimate_has_a_floor() {
        assert_eq!(estimate_seconds(1024, 1), 45);
    }

    #[test]
    fn fresh_job_is_pending_with_retention_window() {
        let job = TranslationJob::new(
            Uuid::new_v4(),
            vec![JobFile {
                original_name: "a.docx".to_string(),
                size_bytes: 10,
                storage_ref: "r".to_string(),
            }],
            None,
            "en".to_string(),
            "es".to_string(),
            1,
        );
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.position, Some(1));
        assert_eq!(job.expires_at - job.created_at, Duration::hours(48));
        assert!(!job.is_expired(job.created_at));
        assert!(job.is_expired(job.expires_at));
    }
}
