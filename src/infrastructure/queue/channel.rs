use async_channel::{Receiver, Sender};
use uuid::Uuid;

use crate::common::error::AppError;

/// FIFO hand-off between job submission and the pipeline workers. MPMC so
/// several workers can share one queue; order of dequeue follows order of
/// submission.
#[derive(Clone)]
pub struct JobQueue {
    tx: Sender<Uuid>,
    rx: Receiver<Uuid>,
}

impl JobQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = async_channel::bounded(capacity);
        Self { tx, rx }
    }

    pub async fn enqueue(&self, job_id: Uuid) -> Result<(), AppError> {
        self.tx
            .send(job_id)
            .await
            .map_err(|_| AppError::StorageUnavailable("job queue is closed".to_string()))
    }

    pub fn receiver(&self) -> Receiver<Uuid> {
        self.rx.clone()
    }

    pub fn close(&self) {
        self.tx.close();
    }
}
