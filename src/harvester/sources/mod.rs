// Metadata sources - the external collaborator that lists playlists and
// fetches video title/description
//
// The pipeline only sees the MetadataSource trait. YtDlpSource shells out to
// yt-dlp, either the native binary or `python3 -m yt_dlp`.

pub mod diagnostics;
#[cfg(test)]
pub(crate) mod testing;
mod traits;
mod ytdlp;

pub use diagnostics::{diagnose_error, FailureReason};
pub use traits::{Launcher, MetadataSource, SourceConfig};
pub use ytdlp::YtDlpSource;
