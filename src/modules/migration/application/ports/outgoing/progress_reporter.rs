use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub batch_id: Uuid,
    pub processed: usize,
    pub total: usize,
    pub failed: usize,
}

impl BatchProgress {
    pub fn is_done(&self) -> bool {
        self.processed >= self.total
    }
}

/// Receives progress while a batch migration runs. Called from the batch
/// task itself, so implementations must not block.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: BatchProgress);
}
