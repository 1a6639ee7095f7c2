//! Remux module for stream-copying media files.
//!
//! This module provides the `Remuxer` trait and the FFmpeg-backed
//! implementation that repackages existing audio/video streams into a new
//! container without re-encoding.
//!
//! # Example
//!
//! ```ignore
//! use ffix_core::remux::{FfmpegRemuxer, Remuxer, RemuxJob};
//!
//! let remuxer = FfmpegRemuxer::with_defaults();
//!
//! // Validate ffmpeg is available
//! remuxer.validate().await?;
//!
//! let job = RemuxJob {
//!     input_path: PathBuf::from("/media/in/movie.mp4"),
//!     output_path: PathBuf::from("/media/out/movie.mp4"),
//! };
//!
//! let result = remuxer.remux(&job).await?;
//! println!("Remuxed {} bytes in {} ms", result.output_size_bytes, result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::RemuxerConfig;
pub use error::{stderr_preview, RemuxError};
pub use ffmpeg::FfmpegRemuxer;
pub use traits::Remuxer;
pub use types::{RemuxJob, RemuxResult};
