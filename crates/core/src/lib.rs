pub mod batch;
pub mod media;
pub mod remux;
pub mod testing;

pub use batch::{BatchOptions, BatchReport, BatchRunner, FileOutcome};
pub use remux::{
    stderr_preview, FfmpegRemuxer, RemuxError, RemuxJob, RemuxResult, Remuxer, RemuxerConfig,
};
