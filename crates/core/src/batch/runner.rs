//! Sequential directory batch runner.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::media;
use crate::remux::{stderr_preview, RemuxError, RemuxJob, Remuxer};

use super::types::{BatchOptions, BatchReport, FileOutcome};

/// Number of stderr lines included in failure messages.
const STDERR_PREVIEW_LINES: usize = 8;

/// Sequential batch converter: one file is remuxed end-to-end, including
/// the optional deletion of its original, before the next begins.
pub struct BatchRunner<R: Remuxer> {
    options: BatchOptions,
    remuxer: R,
}

impl<R: Remuxer> BatchRunner<R> {
    /// Creates a new batch runner.
    pub fn new(options: BatchOptions, remuxer: R) -> Self {
        Self { options, remuxer }
    }

    /// Runs the batch over the source directory.
    ///
    /// Per-file failures are logged and recorded in the returned report but
    /// never abort the batch. Only a failure to enumerate the source
    /// directory itself is returned as an error.
    pub async fn run(&self) -> Result<BatchReport, RemuxError> {
        info!("Using remuxer: {}", self.remuxer.name());
        info!("Source dir: {}", absolutize(&self.options.source_path).display());
        info!("Output dir: {}", absolutize(&self.options.output_path).display());
        info!("Keep original files: {}", self.options.keep_originals);

        let mut entries = fs::read_dir(&self.options.source_path)
            .await
            .map_err(|e| RemuxError::filesystem(&self.options.source_path, e))?;

        let mut report = BatchReport::default();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RemuxError::filesystem(&self.options.source_path, e))?
        {
            let path = entry.path();
            if !media::is_video(&path) {
                debug!("Skipping '{}': not a video file", path.display());
                continue;
            }

            let output_path = self.options.output_path.join(entry.file_name());
            let outcome = self.convert_file(&path, output_path).await;
            report.outcomes.push((path, outcome));
        }

        Ok(report)
    }

    /// Converts one file, reporting the outcome without failing the batch.
    async fn convert_file(&self, input: &Path, output_path: PathBuf) -> FileOutcome {
        if let Err(e) = fs::create_dir_all(&self.options.output_path).await {
            let err = RemuxError::filesystem(&self.options.output_path, e);
            error!(
                "Cannot create output directory for '{}': {}",
                input.display(),
                err
            );
            return FileOutcome::Failed(err);
        }

        // Pass-through rename: the destination keeps the original extension.
        // Stream copy does not change the container, so the name still fits.
        info!("Converting '{}' to '{}'", input.display(), output_path.display());

        let job = RemuxJob {
            input_path: input.to_path_buf(),
            output_path,
        };

        match self.remuxer.remux(&job).await {
            Ok(result) => {
                info!(
                    "Successfully converted '{}' ({} bytes)",
                    input.display(),
                    result.output_size_bytes
                );
                self.cleanup_original(input, job.output_path).await
            }
            Err(RemuxError::ExitedNonZero { code, stderr }) => {
                error!(
                    "Error converting '{}': transcoder exited with code {:?}",
                    input.display(),
                    code
                );
                error!("Error output: {}", stderr_preview(&stderr, STDERR_PREVIEW_LINES));
                FileOutcome::Failed(RemuxError::ExitedNonZero { code, stderr })
            }
            Err(err @ RemuxError::LaunchFailed { .. }) => {
                error!("Failed to run transcoder for '{}': {}", input.display(), err);
                FileOutcome::Failed(err)
            }
            Err(err) => {
                error!("Error converting '{}': {}", input.display(), err);
                FileOutcome::Failed(err)
            }
        }
    }

    /// Deletes the original after a successful conversion, unless originals
    /// are kept. Deletion failure is reported but leaves both files in place.
    async fn cleanup_original(&self, input: &Path, output_path: PathBuf) -> FileOutcome {
        if self.options.keep_originals {
            return FileOutcome::Converted {
                output_path,
                removed_original: false,
            };
        }

        match fs::remove_file(input).await {
            Ok(()) => {
                info!("Removed original file '{}'", input.display());
                FileOutcome::Converted {
                    output_path,
                    removed_original: true,
                }
            }
            Err(e) => {
                let err = RemuxError::filesystem(input, e);
                warn!(
                    "Failed to remove original file '{}': {}",
                    input.display(),
                    err
                );
                FileOutcome::RemoveFailed {
                    output_path,
                    error: err,
                }
            }
        }
    }
}

/// Resolves a path against the current directory for diagnostics only.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
