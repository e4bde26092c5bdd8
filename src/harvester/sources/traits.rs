// MetadataSource trait and common configuration

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

use crate::harvester::errors::SourceError;
use crate::harvester::models::{PlaylistRef, VideoMetadata, VideoRef};

/// How yt-dlp gets started
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Launcher {
    /// Locate the yt-dlp binary in common install paths or PATH
    #[default]
    Auto,
    /// Explicit path to the yt-dlp binary
    Binary(PathBuf),
    /// Python interpreter running the yt_dlp module
    Python(String),
}

impl fmt::Display for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Binary(path) => write!(f, "{}", path.display()),
            Self::Python(python) => write!(f, "{} -m yt_dlp", python),
        }
    }
}

/// Configuration for the metadata source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub launcher: Launcher,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Path to cookies.txt file
    pub cookies_path: Option<PathBuf>,
    /// Passed to yt-dlp as --socket-timeout; bounds one stalled network read
    pub socket_timeout_seconds: u32,
    /// Wall-clock limit for a whole yt-dlp call, unbounded when unset
    pub process_timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            launcher: Launcher::Auto,
            proxy: None,
            cookies_path: None,
            socket_timeout_seconds: 30,
            process_timeout_seconds: None,
        }
    }
}

impl SourceConfig {
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_cookies_path(mut self, path: Option<PathBuf>) -> Self {
        self.cookies_path = path;
        self
    }

    pub fn with_socket_timeout(mut self, seconds: u32) -> Self {
        self.socket_timeout_seconds = seconds;
        self
    }

    pub fn with_process_timeout(mut self, seconds: Option<u64>) -> Self {
        self.process_timeout_seconds = seconds;
        self
    }
}

/// External collaborator that knows playlists and video metadata
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Name of the source (for logging)
    fn name(&self) -> &'static str;

    /// All videos of the playlist, in platform order
    async fn list_videos(&self, playlist: &PlaylistRef) -> Result<Vec<VideoRef>, SourceError>;

    /// Title and description of one video
    async fn get_metadata(&self, video: &VideoRef) -> Result<VideoMetadata, SourceError>;
}
