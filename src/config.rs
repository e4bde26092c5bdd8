// User configuration, read from `<config dir>/playlist-links/config.toml`
//
// Every field is optional in the file; command-line flags override it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::harvester::export::{Encoding, ExportOptions, DEFAULT_OUTPUT};
use crate::harvester::extractors::ExtractorKind;
use crate::harvester::sources::{Launcher, SourceConfig};
use crate::harvester::utils::python_cmd;
use crate::harvester::HarvestError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit yt-dlp binary; looked up in common paths when unset
    pub ytdlp_path: Option<PathBuf>,
    /// Run `python3 -m yt_dlp` instead of the binary
    pub use_python: bool,
    pub proxy: Option<String>,
    pub cookies_path: Option<PathBuf>,
    /// yt-dlp --socket-timeout
    pub socket_timeout_seconds: u32,
    /// Kill a yt-dlp call that runs longer than this; no limit when unset
    pub process_timeout_seconds: Option<u64>,
    pub encoding: Encoding,
    pub include_title: bool,
    pub extractor: ExtractorKind,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            use_python: false,
            proxy: None,
            cookies_path: None,
            socket_timeout_seconds: SourceConfig::default().socket_timeout_seconds,
            process_timeout_seconds: None,
            encoding: Encoding::Utf8,
            include_title: true,
            extractor: ExtractorKind::Line,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("playlist-links").join("config.toml"))
    }

    /// Load from `explicit`, or from the default location if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self, HarvestError> {
        match explicit {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| HarvestError::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Self::from_toml(&text, path)
            }
            None => match Self::default_path() {
                Some(path) => match fs::read_to_string(&path) {
                    Ok(text) => Self::from_toml(&text, &path),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
                    Err(e) => Err(HarvestError::Config {
                        path,
                        message: e.to_string(),
                    }),
                },
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self, HarvestError> {
        toml::from_str(text).map_err(|e| HarvestError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn launcher(&self) -> Launcher {
        if self.use_python {
            Launcher::Python(python_cmd())
        } else if let Some(path) = &self.ytdlp_path {
            Launcher::Binary(path.clone())
        } else {
            Launcher::Auto
        }
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::default()
            .with_launcher(self.launcher())
            .with_proxy(self.proxy.clone())
            .with_cookies_path(self.cookies_path.clone())
            .with_socket_timeout(self.socket_timeout_seconds)
            .with_process_timeout(self.process_timeout_seconds)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            path: self.output.clone(),
            encoding: self.encoding,
            include_title: self.include_title,
        }
    }
}
