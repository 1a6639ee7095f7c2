//! Types for the remux module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single remux invocation: one input file, one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemuxJob {
    /// Source media file.
    pub input_path: PathBuf,
    /// Destination file; overwritten if it already exists.
    pub output_path: PathBuf,
}

/// Result of a successful remux.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemuxResult {
    /// Path the output was written to.
    pub output_path: PathBuf,
    /// Size of the output file in bytes.
    pub output_size_bytes: u64,
    /// Wall-clock duration of the remux in milliseconds.
    pub duration_ms: u64,
}
