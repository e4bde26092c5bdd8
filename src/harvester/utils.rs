// Helper functions for metadata sources

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

use super::errors::SourceError;

/// Run command, collecting stdout and stderr
///
/// With `timeout_secs` set the process is killed once the whole call takes
/// longer than that; `None` waits for it to exit.
pub async fn run_output_with_timeout(
    program: &Path,
    args: &[OsString],
    timeout_secs: Option<u64>,
) -> Result<Output, SourceError> {
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::ToolNotFound(program.display().to_string()),
            _ => SourceError::Execution(format!("Failed to start {}: {}", program.display(), e)),
        })?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| SourceError::Execution("Failed to capture stdout".to_string()))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| SourceError::Execution("Failed to capture stderr".to_string()))?;

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });

    let waited = match timeout_secs {
        Some(secs) => timeout(Duration::from_secs(secs), child.wait())
            .await
            .map_err(|_| secs),
        None => Ok(child.wait().await),
    };

    match waited {
        Ok(status) => {
            let status = status.map_err(|e| {
                SourceError::Execution(format!("Failed to wait for {}: {}", program.display(), e))
            })?;
            let stdout = join_pipe(stdout_task, "stdout").await?;
            let stderr = join_pipe(stderr_task, "stderr").await?;
            Ok(Output {
                status,
                stdout,
                stderr,
            })
        }
        Err(secs) => {
            let _ = child.kill().await;
            stdout_task.abort();
            stderr_task.abort();
            Err(SourceError::Timeout(secs))
        }
    }
}

async fn join_pipe(
    task: tokio::task::JoinHandle<std::io::Result<Vec<u8>>>,
    name: &str,
) -> Result<Vec<u8>, SourceError> {
    task.await
        .map_err(|e| SourceError::Execution(format!("{} task failed: {}", name, e)))?
        .map_err(|e| SourceError::Execution(format!("Failed to read {}: {}", name, e)))
}

/// Find yt-dlp executable in common paths
pub fn find_ytdlp() -> PathBuf {
    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
        "/usr/bin/yt-dlp",          // System installation
    ];

    for path in common_paths {
        if Path::new(path).exists() {
            debug!(path, "Found yt-dlp");
            return PathBuf::from(path);
        }
    }

    // Resolved through PATH at spawn time
    PathBuf::from("yt-dlp")
}

/// Python interpreter used for `-m yt_dlp`, overridable through YTDLP_PYTHON
pub fn python_cmd() -> String {
    std::env::var("YTDLP_PYTHON").unwrap_or_else(|_| "python3".to_string())
}
