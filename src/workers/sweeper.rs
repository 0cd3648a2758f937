use std::time::Duration;

use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Drops expired job records once an hour. Expiry is also enforced at read
/// time, so the sweep only reclaims memory.
pub async fn start_sweeper(state: AppState, cancel: CancellationToken) {
    info!("🧹 Starting job sweeper...");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(SWEEP_INTERVAL) => {}
        }

        let removed = state.jobs.remove_expired(OffsetDateTime::now_utc()).await;
        if removed > 0 {
            info!(removed, "🧹 Swept expired jobs");
        }
    }

    info!("🧹 Job sweeper stopped");
}
