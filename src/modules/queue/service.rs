use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use super::dto::{JobStatusResponse, RejectedFile, SubmitResponse};
use super::model::{JobFile, JobStatus, TranslationJob};
use super::store::QueueStats;
use crate::common::error::AppError;
use crate::common::lang;
use crate::common::upload::{BufferedUpload, extension_accepted, sanitize_file_name};
use crate::state::AppState;

pub struct QueueService;

impl QueueService {
    /// Accepts a batch of uploads as a new pending job. Validation is
    /// per-file: offending files are reported and skipped, the rest of
    /// the batch goes through. Nothing touches storage until a file has
    /// passed validation.
    pub async fn submit(
        state: AppState,
        files: Vec<BufferedUpload>,
        glossary: Option<BufferedUpload>,
        source_lang: String,
        target_lang: String,
        mut rejected: Vec<RejectedFile>,
    ) -> Result<SubmitResponse, AppError> {
        lang::validate_pair(&source_lang, &target_lang)?;

        let mut accepted: Vec<BufferedUpload> = Vec::new();
        for upload in files {
            if !extension_accepted(&upload.file_name, state.config.plain_text_segments) {
                rejected.push(RejectedFile {
                    name: upload.file_name.clone(),
                    reason: "unsupported file type (accepted: .docx, .pptx, .xlsx)".to_string(),
                });
                continue;
            }
            accepted.push(upload);
        }

        if accepted.is_empty() {
            let mut reasons: Vec<String> = rejected
                .iter()
                .map(|r| format!("{}: {}", r.name, r.reason))
                .collect();
            if reasons.is_empty() {
                reasons.push("at least one file is required".to_string());
            }
            return Err(AppError::Validation { reasons });
        }

        let job_id = Uuid::new_v4();

        let mut job_files = Vec::with_capacity(accepted.len());
        for (index, upload) in accepted.into_iter().enumerate() {
            let name = sanitize_file_name(&upload.file_name);
            let key = format!("jobs/{job_id}/in/{index}_{name}");
            let size_bytes = upload.bytes.len() as u64;
            let storage_ref = state
                .storage
                .put(&key, upload.bytes, &upload.content_type)
                .await?;
            job_files.push(JobFile {
                original_name: name,
                size_bytes,
                storage_ref,
            });
        }

        let glossary_file = match glossary {
            Some(upload) => {
                let name = sanitize_file_name(&upload.file_name);
                let key = format!("jobs/{job_id}/glossary/{name}");
                let size_bytes = upload.bytes.len() as u64;
                let storage_ref = state
                    .storage
                    .put(&key, upload.bytes, &upload.content_type)
                    .await?;
                Some(JobFile {
                    original_name: name,
                    size_bytes,
                    storage_ref,
                })
            }
            None => None,
        };

        let position = state.jobs.pending_count().await + 1;
        let has_glossary = glossary_file.is_some();
        let job = TranslationJob::new(
            job_id,
            job_files,
            glossary_file,
            source_lang,
            target_lang,
            position,
        );
        let estimated_time = job.estimated_seconds;

        state.jobs.insert(job).await;
        state.queue.enqueue(job_id).await?;

        info!(job_id = %job_id, position, "job queued");

        let mut message = format!("Job accepted at queue position {position}");
        if has_glossary {
            message.push_str("; glossary stored but not applied during translation yet");
        }

        Ok(SubmitResponse {
            job_id,
            position,
            estimated_time,
            message,
            rejected_files: rejected,
        })
    }

    /// Job lookup for polling clients. Unknown and expired ids are
    /// indistinguishable on purpose.
    pub async fn status(state: AppState, job_id: Uuid) -> Result<JobStatusResponse, AppError> {
        let job = Self::fetch_live(&state, job_id).await?;

        let public_urls = job
            .outputs
            .iter()
            .map(|o| state.storage.public_url(&o.storage_ref))
            .collect();

        Ok(JobStatusResponse::from_job(job, public_urls))
    }

    /// Fetches one translated output for a browser-native save. Fails
    /// with NotFound after expiry even when the job completed.
    pub async fn download(
        state: AppState,
        job_id: Uuid,
        file_index: usize,
    ) -> Result<(String, String, Bytes), AppError> {
        let job = Self::fetch_live(&state, job_id).await?;

        if job.status != JobStatus::Completed {
            return Err(AppError::validation("job has no downloadable output yet"));
        }

        let output = job.outputs.get(file_index).ok_or(AppError::NotFound)?;
        let bytes = state.storage.get(&output.storage_ref).await?;
        let content_type = mime_guess::from_path(&output.translated_name)
            .first_or_octet_stream()
            .to_string();

        Ok((output.translated_name.clone(), content_type, bytes))
    }

    pub async fn stats(state: AppState) -> QueueStats {
        state.jobs.stats().await
    }

    async fn fetch_live(state: &AppState, job_id: Uuid) -> Result<TranslationJob, AppError> {
        let job = state.jobs.get(job_id).await.ok_or(AppError::NotFound)?;
        if job.is_expired(time::OffsetDateTime::now_utc()) {
            return Err(AppError::NotFound);
        }
        Ok(job)
    }
}
