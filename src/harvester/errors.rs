// Error types for metadata sources and the harvesting pipeline

use std::path::PathBuf;

use thiserror::Error;

use super::sources::diagnostics::{diagnose_error, FailureReason};

/// Failure reported by a metadata source (yt-dlp or any other collaborator)
#[derive(Debug, Error)]
pub enum SourceError {
    /// yt-dlp or python not found in system
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Process could not be spawned or its pipes could not be read
    #[error("Execution error: {0}")]
    Execution(String),

    /// The call did not finish within the configured socket/process timeout
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// The tool ran and reported a failure on stderr
    #[error("{}: {}", .reason.description(), first_error_line(.stderr))]
    Rejected {
        reason: FailureReason,
        stderr: String,
    },

    /// Output could not be understood
    #[error("Parse error: {0}")]
    Parse(String),
}

impl SourceError {
    /// Classified reason, when the tool told us why it failed
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::Rejected { reason, .. } => Some(*reason),
            Self::Timeout(_) => Some(FailureReason::NetworkTimeout),
            _ => None,
        }
    }
}

// Classify raw stderr text coming back from the tool. A missing tool is
// only reported by the spawn itself, never inferred from stderr.
impl From<String> for SourceError {
    fn from(stderr: String) -> Self {
        let reason = diagnose_error(&stderr).unwrap_or(FailureReason::Unknown);
        Self::Rejected { reason, stderr }
    }
}

fn first_error_line(stderr: &str) -> &str {
    stderr
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("ERROR:"))
        .or_else(|| stderr.lines().map(str::trim).find(|line| !line.is_empty()))
        .unwrap_or("no output")
}

/// Errors surfaced by the harvesting pipeline
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The playlist could not be resolved; the whole run stops
    #[error("Failed to fetch playlist {playlist}: {source}")]
    PlaylistFetch {
        playlist: String,
        #[source]
        source: SourceError,
    },

    /// One video could not be fetched; only that video is skipped
    #[error("Failed to fetch video {video}: {source}")]
    VideoFetch {
        video: String,
        #[source]
        source: SourceError,
    },

    /// The export destination could not be created or written
    #[error("Failed to write export to {}: {source}", .path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unreadable configuration file
    #[error("Invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl HarvestError {
    /// Whether the pipeline may continue with the next video
    pub fn is_per_video(&self) -> bool {
        matches!(self, Self::VideoFetch { .. })
    }
}
