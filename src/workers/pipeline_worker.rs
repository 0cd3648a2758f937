use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::modules::queue::model::{FileOutput, JobStatus, TranslationJob};
use crate::pipeline::DocumentPipeline;
use crate::state::AppState;

/// Consumes job ids from the queue until the token is cancelled. Several
/// workers can run against the same queue; each job is delivered to
/// exactly one of them.
pub async fn start_pipeline_worker(state: AppState, worker_id: usize, cancel: CancellationToken) {
    info!(worker_id, "🔁 Starting pipeline worker...");

    let rx = state.queue.receiver();
    let pipeline = DocumentPipeline::new(state.provider.clone(), state.storage.clone())
        .with_plain_text_segments(state.config.plain_text_segments);

    loop {
        let job_id = tokio::select! {
            _ = cancel.cancelled() => break,
            recv = rx.recv() => match recv {
                Ok(id) => id,
                Err(_) => break,
            },
        };

        if let Err(e) = process_job(&state, &pipeline, job_id).await {
            error!(worker_id, job_id = %job_id, "❌ Job failed: {e}");
        }
    }

    info!(worker_id, "🔁 Pipeline worker stopped");
}

async fn process_job(
    state: &AppState,
    pipeline: &DocumentPipeline,
    job_id: Uuid,
) -> anyhow::Result<()> {
    // None means the job was swept or already claimed; nothing to do.
    let Some(job) = state.jobs.mark_processing(job_id).await else {
        warn!(job_id = %job_id, "dequeued job is gone, skipping");
        return Ok(());
    };

    info!(job_id = %job_id, files = job.files.len(), "📦 Processing job");

    let mut outputs: Vec<FileOutput> = Vec::with_capacity(job.files.len());
    for (index, file) in job.files.iter().enumerate() {
        match pipeline
            .translate_file(
                job.id,
                index,
                &file.original_name,
                &file.storage_ref,
                &job.source_lang,
                &job.target_lang,
            )
            .await
        {
            Ok(outcome) => outputs.push(FileOutput {
                translated_name: outcome.translated_name,
                storage_ref: outcome.storage_ref,
                elements_translated: outcome.elements_translated,
                processing_time_seconds: outcome.processing_time_seconds,
                warnings: outcome.warnings,
            }),
            Err(e) => {
                let message = format!("{}: {e}", file.original_name);
                fail_job(state, job, message.clone()).await;
                anyhow::bail!(message);
            }
        }
    }

    let mut done = job;
    done.status = JobStatus::Completed;
    done.outputs = outputs;
    state.jobs.finish(done).await;

    info!(job_id = %job_id, "✅ Job completed");
    Ok(())
}

async fn fail_job(state: &AppState, mut job: TranslationJob, message: String) {
    job.status = JobStatus::Failed;
    job.outputs = Vec::new();
    job.error = Some(message);
    state.jobs.finish(job).await;
}
