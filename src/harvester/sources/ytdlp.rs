// yt-dlp metadata source
//
// Playlist listing uses --flat-playlist so only the entry URLs are resolved.
// Video metadata comes from --dump-json; only title and description are read.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

use super::traits::{Launcher, MetadataSource, SourceConfig};
use crate::harvester::errors::SourceError;
use crate::harvester::models::{PlaylistRef, VideoMetadata, VideoRef};
use crate::harvester::utils::{find_ytdlp, run_output_with_timeout};

/// Metadata source backed by yt-dlp
pub struct YtDlpSource {
    program: PathBuf,
    prefix_args: Vec<OsString>,
    config: SourceConfig,
}

impl YtDlpSource {
    pub fn new(config: SourceConfig) -> Self {
        let (program, prefix_args) = match &config.launcher {
            Launcher::Auto => (find_ytdlp(), Vec::new()),
            Launcher::Binary(path) => (path.clone(), Vec::new()),
            Launcher::Python(python) => (
                PathBuf::from(python),
                vec![OsString::from("-m"), OsString::from("yt_dlp")],
            ),
        };

        Self {
            program,
            prefix_args,
            config,
        }
    }

    /// Options shared by both calls
    fn common_args(&self) -> Vec<OsString> {
        let mut args = self.prefix_args.clone();
        args.push("--no-warnings".into());
        args.push("--socket-timeout".into());
        args.push(self.config.socket_timeout_seconds.to_string().into());

        if let Some(path) = &self.config.cookies_path {
            args.push("--cookies".into());
            args.push(path.clone().into_os_string());
        }

        if let Some(proxy) = &self.config.proxy {
            args.push("--proxy".into());
            args.push(proxy.into());
        }

        args
    }

    fn list_args(&self, playlist: &PlaylistRef) -> Vec<OsString> {
        let mut args = self.common_args();
        args.extend(["--flat-playlist", "--print", "url"].map(OsString::from));
        args.push(playlist.as_str().into());
        args
    }

    fn metadata_args(&self, video: &VideoRef) -> Vec<OsString> {
        let mut args = self.common_args();
        args.extend(["--dump-json", "--skip-download", "--no-playlist"].map(OsString::from));
        args.push(video.as_str().into());
        args
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Vec<u8>, SourceError> {
        debug!(
            program = %self.program.display(),
            args = ?args,
            "Running yt-dlp"
        );

        let output =
            run_output_with_timeout(&self.program, &args, self.config.process_timeout_seconds)
                .await?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            debug!(status = %output.status, stderr = %stderr.trim(), "yt-dlp failed");
            Err(SourceError::from(stderr))
        }
    }

    /// One entry URL per non-empty line
    fn parse_listing(stdout: &[u8]) -> Vec<VideoRef> {
        String::from_utf8_lossy(stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && *line != "NA")
            .map(VideoRef::new)
            .collect()
    }

    /// Parse --dump-json output into title and description
    fn parse_json(stdout: &[u8]) -> Result<VideoMetadata, SourceError> {
        let json: serde_json::Value = serde_json::from_slice(stdout)
            .map_err(|e| SourceError::Parse(format!("Invalid JSON: {}", e)))?;

        let title = json["title"]
            .as_str()
            .ok_or_else(|| SourceError::Parse("No title in JSON".to_string()))?;
        let description = json["description"].as_str().map(str::to_string);

        Ok(VideoMetadata::new(title, description))
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

#[async_trait]
impl MetadataSource for YtDlpSource {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn list_videos(&self, playlist: &PlaylistRef) -> Result<Vec<VideoRef>, SourceError> {
        let stdout = self.run(self.list_args(playlist)).await?;
        let videos = Self::parse_listing(&stdout);
        debug!(playlist = %playlist, count = videos.len(), "Listed playlist");
        Ok(videos)
    }

    async fn get_metadata(&self, video: &VideoRef) -> Result<VideoMetadata, SourceError> {
        let stdout = self.run(self.metadata_args(video)).await?;
        Self::parse_json(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn test_list_args() {
        let source = YtDlpSource::new(
            SourceConfig::default()
                .with_launcher(Launcher::Binary(PathBuf::from("/usr/bin/yt-dlp")))
                .with_socket_timeout(30),
        );
        let args = strings(&source.list_args(&PlaylistRef::new("https://youtube.com/playlist?list=PL1")));
        assert_eq!(
            args,
            vec![
                "--no-warnings",
                "--socket-timeout",
                "30",
                "--flat-playlist",
                "--print",
                "url",
                "https://youtube.com/playlist?list=PL1",
            ]
        );
    }

    #[test]
    fn test_python_launcher_with_proxy_and_cookies() {
        let source = YtDlpSource::new(
            SourceConfig::default()
                .with_launcher(Launcher::Python("python3".to_string()))
                .with_proxy(Some("socks5://127.0.0.1:1080".to_string()))
                .with_cookies_path(Some(PathBuf::from("cookies.txt"))),
        );
        assert_eq!(source.program, PathBuf::from("python3"));

        let args = strings(&source.metadata_args(&VideoRef::new("https://youtu.be/abc")));
        assert_eq!(&args[..2], &["-m", "yt_dlp"]);
        assert!(args.windows(2).any(|w| w == ["--cookies", "cookies.txt"]));
        assert!(args.windows(2).any(|w| w == ["--proxy", "socks5://127.0.0.1:1080"]));
        assert!(args.contains(&"--dump-json".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://youtu.be/abc"));
    }

    #[test]
    fn test_parse_listing_skips_blank_lines() {
        let stdout = b"https://www.youtube.com/watch?v=a\n\n  https://www.youtube.com/watch?v=b  \nNA\n";
        let videos = YtDlpSource::parse_listing(stdout);
        assert_eq!(
            videos,
            vec![
                VideoRef::new("https://www.youtube.com/watch?v=a"),
                VideoRef::new("https://www.youtube.com/watch?v=b"),
            ]
        );
    }

    #[test]
    fn test_parse_json() {
        let meta = YtDlpSource::parse_json(
            br#"{"id": "a", "title": "Intro", "description": "site: https://x.example"}"#,
        )
        .unwrap();
        assert_eq!(meta.title, "Intro");
        assert_eq!(meta.description_text(), "site: https://x.example");

        let meta = YtDlpSource::parse_json(br#"{"title": "No desc", "description": null}"#).unwrap();
        assert_eq!(meta.description_text(), "");
    }

    #[test]
    fn test_parse_json_errors() {
        assert!(matches!(
            YtDlpSource::parse_json(b"not json"),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            YtDlpSource::parse_json(br#"{"description": "x"}"#),
            Err(SourceError::Parse(_))
        ));
    }

    #[cfg(unix)]
    fn fake_ytdlp(dir: &std::path::Path, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_listing_outlives_socket_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_ytdlp(
            dir.path(),
            "for i in 1 2 3; do echo \"https://www.youtube.com/watch?v=$i\"; sleep 1; done",
        );
        let source = YtDlpSource::new(
            SourceConfig::default()
                .with_launcher(Launcher::Binary(binary))
                .with_socket_timeout(1),
        );

        let videos = source.list_videos(&PlaylistRef::new("PL")).await.unwrap();
        assert_eq!(videos.len(), 3);
        assert_eq!(videos[2], VideoRef::new("https://www.youtube.com/watch?v=3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_timeout_is_separate() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_ytdlp(dir.path(), "sleep 5");
        let source = YtDlpSource::new(
            SourceConfig::default()
                .with_launcher(Launcher::Binary(binary))
                .with_socket_timeout(30)
                .with_process_timeout(Some(1)),
        );

        let err = source.list_videos(&PlaylistRef::new("PL")).await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout(1)));
    }
}
