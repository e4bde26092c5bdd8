// Progress observer trait definition

use tracing::{info, warn};

use super::models::{Progress, ProgressStatus};

/// Passive observer of the per-video loop
///
/// Called once per processed video, after the outcome is known. Observers
/// cannot influence ordering or results.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: &Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(&Progress) + Send + Sync,
{
    fn on_progress(&self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that reports progress through tracing
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&self, progress: &Progress) {
        match progress.status {
            ProgressStatus::Done { links } => info!(
                "[{}/{}] {} ({} links)",
                progress.index, progress.total, progress.video_ref, links
            ),
            ProgressStatus::Skipped => warn!(
                "[{}/{}] {} skipped",
                progress.index, progress.total, progress.video_ref
            ),
        }
    }
}
