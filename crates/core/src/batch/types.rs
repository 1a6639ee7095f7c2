//! Types for the batch module.

use std::path::{Path, PathBuf};

use crate::remux::RemuxError;

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for video files (non-recursive).
    pub source_path: PathBuf,
    /// Directory converted files are written to; created on demand.
    pub output_path: PathBuf,
    /// Keep original files after a successful conversion.
    pub keep_originals: bool,
}

impl BatchOptions {
    /// Creates options for the given output directory, scanning the current
    /// directory and deleting originals on success.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: PathBuf::from("."),
            output_path: output_path.into(),
            keep_originals: false,
        }
    }

    /// Sets the source directory.
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = source_path.into();
        self
    }

    /// Sets whether originals are kept after a successful conversion.
    pub fn with_keep_originals(mut self, keep: bool) -> Self {
        self.keep_originals = keep;
        self
    }
}

/// Outcome of processing one entry that classified as video.
#[derive(Debug)]
pub enum FileOutcome {
    /// Conversion succeeded.
    Converted {
        output_path: PathBuf,
        /// Whether the original file was deleted afterwards.
        removed_original: bool,
    },
    /// Conversion succeeded but the original could not be deleted. The
    /// converted output remains alongside the original.
    RemoveFailed {
        output_path: PathBuf,
        error: RemuxError,
    },
    /// Conversion failed; the original file is untouched.
    Failed(RemuxError),
}

impl FileOutcome {
    /// Whether a converted output was produced for this entry.
    pub fn converted(&self) -> bool {
        matches!(self, Self::Converted { .. } | Self::RemoveFailed { .. })
    }
}

/// Per-file outcomes of a batch run.
///
/// Outcomes appear in directory enumeration order, which is unspecified;
/// consumers should not rely on it beyond set equality.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(PathBuf, FileOutcome)>,
}

impl BatchReport {
    /// Number of entries for which a converted output was produced.
    pub fn converted_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.converted()).count()
    }

    /// Number of entries whose conversion failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, FileOutcome::Failed(_)))
            .count()
    }

    /// Looks up the outcome recorded for a source path.
    pub fn outcome_for(&self, path: &Path) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, o)| o)
    }
}
