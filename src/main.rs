use std::sync::Arc;

use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use translator_backend::config::settings::{AppConfig, StorageBackend};
use translator_backend::infrastructure::provider::mymemory::MyMemoryTranslator;
use translator_backend::infrastructure::provider::openai::OpenAiTranslator;
use translator_backend::infrastructure::queue::channel::JobQueue;
use translator_backend::infrastructure::storage::{MemoryStorage, S3Storage, StorageGateway};
use translator_backend::state::AppState;
use translator_backend::{app, workers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting server...");

    let config = AppConfig::new()?;

    let storage: Arc<dyn StorageGateway> = match config.storage_backend {
        StorageBackend::S3 => Arc::new(
            S3Storage::new(
                &config.s3_endpoint,
                &config.s3_bucket,
                &config.s3_access_key,
                &config.s3_secret_key,
            )
            .await,
        ),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    };

    let provider = Arc::new(OpenAiTranslator::new(&config));
    let text_provider = Arc::new(MyMemoryTranslator::new(&config.mymemory_base_url));

    let queue = JobQueue::new(config.queue_capacity);
    let state = AppState::new(config, storage, provider, text_provider, queue);

    let cancel = CancellationToken::new();
    for worker_id in 0..state.config.worker_count {
        tokio::spawn(workers::pipeline_worker::start_pipeline_worker(
            state.clone(),
            worker_id,
            cancel.clone(),
        ));
    }
    tokio::spawn(workers::sweeper::start_sweeper(state.clone(), cancel.clone()));

    let app = app::create_app(state.clone()).await;

    let addr = format!("0.0.0.0:{}", state.config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state, cancel))
        .await?;

    Ok(())
}

async fn shutdown_signal(state: AppState, cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down...");
    }
    state.queue.close();
    cancel.cancel();
}
