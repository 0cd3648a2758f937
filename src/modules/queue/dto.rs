use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::model::{JobStatus, TranslationJob};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_id: Uuid,
    pub position: usize,
    /// Seconds, fixed at submission.
    pub estimated_time: u64,
    pub message: String,
    /// Files refused by per-file validation; the rest of the batch was
    /// still accepted.
    pub rejected_files: Vec<RejectedFile>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectedFile {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobFileDto {
    pub original_name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileOutputDto {
    pub translated_name: String,
    pub elements_translated: usize,
    pub processing_time_seconds: f64,
    pub warnings: Vec<String>,
    /// Portal download route for this output.
    pub download_url: String,
    /// Direct blob URL from the storage gateway.
    pub public_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub position: Option<usize>,
    pub source_lang: String,
    pub target_lang: String,
    pub estimated_time: u64,
    /// Unix epoch seconds.
    pub created_at: i64,
    /// Unix epoch seconds.
    pub expires_at: i64,
    pub files: Vec<JobFileDto>,
    pub outputs: Vec<FileOutputDto>,
    pub error: Option<String>,
    /// Present once completed; points at the first output.
    pub download_url: Option<String>,
}

impl JobStatusResponse {
    pub fn from_job(job: TranslationJob, public_urls: Vec<String>) -> Self {
        let outputs: Vec<FileOutputDto> = job
            .outputs
            .iter()
            .zip(public_urls)
            .enumerate()
            .map(|(index, (output, public_url))| FileOutputDto {
                translated_name: output.translated_name.clone(),
                elements_translated: output.elements_translated,
                processing_time_seconds: output.processing_time_seconds,
                warnings: output.warnings.clone(),
                download_url: format!("/api/queue/download/{}/{}", job.id, index),
                public_url,
            })
            .collect();

        let download_url = outputs.first().map(|o| o.download_url.clone());

        Self {
            job_id: job.id,
            status: job.status,
            position: job.position,
            source_lang: job.source_lang,
            target_lang: job.target_lang,
            estimated_time: job.estimated_seconds,
            created_at: job.created_at.unix_timestamp(),
            expires_at: job.expires_at.unix_timestamp(),
            files: job
                .files
                .into_iter()
                .map(|f| JobFileDto {
                    original_name: f.original_name,
                    size_bytes: f.size_bytes,
                })
                .collect(),
            outputs,
            error: job.error,
            download_url,
        }
    }
}
