use tracing::{debug, info};

use crate::modules::migration::application::ports::outgoing::{BatchProgress, ProgressReporter};

/// Writes batch progress to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressReporter;

impl ProgressReporter for TracingProgressReporter {
    fn report(&self, progress: BatchProgress) {
        if progress.is_done() {
            info!(
                batch_id = %progress.batch_id,
                total = progress.total,
                failed = progress.failed,
                "Batch migration complete"
            );
        } else {
            debug!(
                batch_id = %progress.batch_id,
                processed = progress.processed,
                total = progress.total,
                failed = progress.failed,
                "Batch migration progress"
            );
        }
    }
}
