//! Configuration for the remux module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the FFmpeg-based remuxer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemuxerConfig {
    /// Path to the ffmpeg binary; a bare name is resolved via the search path.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[serde(default = "default_log_level")]
    pub ffmpeg_log_level: String,

    /// Additional global ffmpeg arguments, inserted before the output path.
    #[serde(default)]
    pub extra_ffmpeg_args: Vec<String>,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_log_level() -> String {
    "warning".to_string()
}

impl Default for RemuxerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffmpeg_log_level: default_log_level(),
            extra_ffmpeg_args: Vec::new(),
        }
    }
}

impl RemuxerConfig {
    /// Creates a config with a custom ffmpeg path.
    pub fn with_ffmpeg_path(ffmpeg_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ..Default::default()
        }
    }

    /// Sets the ffmpeg log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.ffmpeg_log_level = level.into();
        self
    }

    /// Adds extra global ffmpeg arguments.
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_ffmpeg_args = args;
        self
    }
}
