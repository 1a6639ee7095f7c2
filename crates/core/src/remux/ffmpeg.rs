//! FFmpeg-based remuxer implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use super::config::RemuxerConfig;
use super::error::RemuxError;
use super::traits::Remuxer;
use super::types::{RemuxJob, RemuxResult};

/// FFmpeg-based remuxer.
///
/// Invokes ffmpeg in stream-copy mode (`-c copy`), so the output is a
/// repackaging of the input streams, not a re-encode. Existing output files
/// are overwritten without prompting (`-y`).
pub struct FfmpegRemuxer {
    config: RemuxerConfig,
}

impl FfmpegRemuxer {
    /// Creates a new FFmpeg remuxer with the given configuration.
    pub fn new(config: RemuxerConfig) -> Self {
        Self { config }
    }

    /// Creates a remuxer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RemuxerConfig::default())
    }

    /// Builds ffmpeg arguments for a stream-copy run.
    fn build_args(&self, input_path: &Path, output_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-c".to_string(),
            "copy".to_string(),
        ];

        // Log level
        args.extend([
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ]);

        // Extra args
        args.extend(self.config.extra_ffmpeg_args.iter().cloned());

        // Output
        args.push(output_path.to_string_lossy().to_string());

        args
    }

    fn launch_failed(&self, source: std::io::Error) -> RemuxError {
        RemuxError::LaunchFailed {
            program: self.config.ffmpeg_path.clone(),
            source,
        }
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    /// Runs ffmpeg and waits for it to exit.
    ///
    /// The exit status is the success signal, with one addition: a zero
    /// exit that left no output file behind is reported as a filesystem
    /// error rather than a success.
    async fn remux(&self, job: &RemuxJob) -> Result<RemuxResult, RemuxError> {
        let start = Instant::now();
        let args = self.build_args(&job.input_path, &job.output_path);

        debug!(
            "Running {} {}",
            self.config.ffmpeg_path.display(),
            args.join(" ")
        );

        // Output is captured, not streamed; stderr is diagnostic only.
        let output = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.launch_failed(e))?;

        if !output.status.success() {
            return Err(RemuxError::ExitedNonZero {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        // Zero exit but no output file is still a failure worth surfacing.
        let meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|e| RemuxError::filesystem(&job.output_path, e))?;

        Ok(RemuxResult {
            output_path: job.output_path.clone(),
            output_size_bytes: meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), RemuxError> {
        Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| self.launch_failed(e))?;
        Ok(())
    }
}
