//! Error types for the remux module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while remuxing a file.
///
/// The three variants let call sites branch on what went wrong: the
/// transcoder ran and failed, the transcoder command could not start at
/// all, or a filesystem operation around the conversion failed.
#[derive(Debug, Error)]
pub enum RemuxError {
    /// Transcoder ran and exited with a non-zero status.
    #[error("transcoder exited with code {code:?}")]
    ExitedNonZero {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error output, diagnostic only.
        stderr: String,
    },

    /// Transcoder command could not be started at all.
    #[error("could not run transcoder '{program}': {source}")]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation (delete, directory creation, metadata) failed.
    #[error("filesystem operation failed on '{path}': {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RemuxError {
    /// Creates a filesystem error for the given path.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Bounded preview of captured stderr: the first `max_lines` lines, with an
/// explicit marker when more were captured.
pub fn stderr_preview(stderr: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = stderr.lines().collect();
    if lines.len() <= max_lines {
        return lines.join("\n");
    }
    let mut preview = lines[..max_lines].join("\n");
    preview.push_str(&format!("\n... ({} more lines)", lines.len() - max_lines));
    preview
}
