use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use playlist_links::harvester::{
    Encoding, ExtractorKind, Harvester, LogProgress, PlaylistRef, SkippedVideo, YtDlpSource,
};
use playlist_links::Config;

/// Extract links and the text in front of them from every video description
/// of a playlist
#[derive(Parser, Debug)]
#[command(name = "playlist-links", version, about)]
struct Cli {
    /// Playlist URL
    playlist_url: String,

    /// Only process the first N videos of the playlist
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<NonZeroUsize>,

    /// Write a CSV file instead of printing the JSON report
    #[arg(long)]
    csv: bool,

    /// CSV destination (implies --csv)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// CSV text encoding: utf8 or utf16
    #[arg(long)]
    encoding: Option<Encoding>,

    /// Leave the title column out of the CSV
    #[arg(long)]
    no_title: bool,

    /// Link extractor: line or markdown
    #[arg(long)]
    extractor: Option<ExtractorKind>,

    /// Proxy passed to yt-dlp
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// cookies.txt passed to yt-dlp
    #[arg(long, value_name = "FILE")]
    cookies: Option<PathBuf>,

    /// yt-dlp socket timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u32>,

    /// Kill any single yt-dlp call after this many seconds (default: no limit)
    #[arg(long, value_name = "SECS")]
    process_timeout: Option<u64>,

    /// Path to the yt-dlp binary
    #[arg(long, value_name = "PATH")]
    ytdlp: Option<PathBuf>,

    /// Run yt-dlp through `python3 -m yt_dlp`
    #[arg(long)]
    python: bool,

    /// Config file (default: <config dir>/playlist-links/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.output {
            config.output = path.clone();
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if self.no_title {
            config.include_title = false;
        }
        if let Some(extractor) = self.extractor {
            config.extractor = extractor;
        }
        if self.proxy.is_some() {
            config.proxy = self.proxy.clone();
        }
        if self.cookies.is_some() {
            config.cookies_path = self.cookies.clone();
        }
        if let Some(timeout) = self.timeout {
            config.socket_timeout_seconds = timeout;
        }
        if self.process_timeout.is_some() {
            config.process_timeout_seconds = self.process_timeout;
        }
        if self.ytdlp.is_some() {
            config.ytdlp_path = self.ytdlp.clone();
        }
        if self.python {
            config.use_python = true;
        }
    }

    fn wants_csv(&self) -> bool {
        self.csv || self.output.is_some()
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose {
        "playlist_links=debug"
    } else {
        "playlist_links=info"
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn report_skipped(skipped: &[SkippedVideo]) {
    if skipped.is_empty() {
        return;
    }
    warn!("{} video(s) skipped:", skipped.len());
    for video in skipped {
        warn!("  {}: {}", video.video_ref, video.message);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);

    let source_config = config.source_config();
    info!(
        launcher = %source_config.launcher,
        extractor = %config.extractor,
        "playlist-links starting"
    );

    let harvester = Harvester::new(YtDlpSource::new(source_config))
        .with_extractor(config.extractor.build())
        .with_observer(Box::new(LogProgress));
    let playlist = PlaylistRef::new(cli.playlist_url.as_str());

    if cli.wants_csv() {
        let options = config.export_options();
        let summary = harvester.export(&playlist, cli.limit, &options).await?;
        report_skipped(&summary.skipped);
        println!(
            "Data extracted and saved to {} ({} rows)",
            options.path.display(),
            summary.rows
        );
    } else {
        let report = harvester.build_report(&playlist, cli.limit).await?;
        report_skipped(&report.skipped);
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{}", json);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "playlist-links",
            "https://www.youtube.com/playlist?list=PL1",
            "-n",
            "3",
            "--encoding",
            "utf16",
            "--no-title",
            "--extractor",
            "markdown",
            "-o",
            "out.csv",
            "--timeout",
            "10",
            "--process-timeout",
            "600",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(cli.limit, NonZeroUsize::new(3));
        assert!(cli.wants_csv());
        assert_eq!(config.encoding, Encoding::Utf16);
        assert!(!config.include_title);
        assert_eq!(config.extractor, ExtractorKind::Markdown);
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.source_config().socket_timeout_seconds, 10);
        assert_eq!(config.source_config().process_timeout_seconds, Some(600));
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(Cli::try_parse_from(["playlist-links", "PL", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_report_mode_by_default() {
        let cli = Cli::parse_from(["playlist-links", "PL"]);
        assert!(!cli.wants_csv());
        assert_eq!(cli.limit, None);
    }
}
