mod tracing_progress_reporter;

pub use tracing_progress_reporter::TracingProgressReporter;
