use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::provider::TranslationProvider;
use crate::infrastructure::queue::channel::JobQueue;
use crate::infrastructure::storage::StorageGateway;
use crate::modules::queue::store::JobStore;
use crate::modules::text::session::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: Arc<dyn StorageGateway>,
    /// Document pipeline provider.
    pub provider: Arc<dyn TranslationProvider>,
    /// Lightweight provider for short in-session texts.
    pub text_provider: Arc<dyn TranslationProvider>,
    pub jobs: JobStore,
    pub queue: JobQueue,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn StorageGateway>,
        provider: Arc<dyn TranslationProvider>,
        text_provider: Arc<dyn TranslationProvider>,
        queue: JobQueue,
    ) -> Self {
        Self {
            config,
            storage,
            provider,
            text_provider,
            jobs: JobStore::new(),
            queue,
            sessions: SessionRegistry::new(),
        }
    }
}
