//! Batch conversion of a directory of video files.
//!
//! Scans one directory (non-recursive), classifies entries by extension,
//! and remuxes each video file into the output directory under its original
//! name. Originals are deleted after a successful conversion unless the
//! batch is configured to keep them. Per-file failures never abort the
//! batch.

mod runner;
mod types;

pub use runner::BatchRunner;
pub use types::{BatchOptions, BatchReport, FileOutcome};
