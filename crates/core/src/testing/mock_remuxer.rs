//! Mock remuxer for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::remux::{RemuxError, RemuxJob, RemuxResult, Remuxer};

/// A recorded remux job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRemux {
    /// The job that was submitted.
    pub job: RemuxJob,
    /// Whether the remux succeeded.
    pub success: bool,
}

/// Mock implementation of the `Remuxer` trait.
///
/// Provides controllable behavior for testing:
/// - records every job for assertions
/// - fails configured input paths with a chosen exit code and stderr
/// - can fail the next call with an injected error
/// - writes a stub output file on success so callers can assert existence
///
/// Clones share state, so tests can hand one clone to a `BatchRunner` and
/// keep another for assertions.
#[derive(Debug, Clone, Default)]
pub struct MockRemuxer {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    jobs: RwLock<Vec<RecordedRemux>>,
    failing_inputs: RwLock<HashMap<PathBuf, (i32, String)>>,
    next_error: RwLock<Option<RemuxError>>,
    skip_output_writes: RwLock<bool>,
}

impl MockRemuxer {
    /// Creates a new mock remuxer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded jobs.
    pub async fn recorded_jobs(&self) -> Vec<RecordedRemux> {
        self.inner.jobs.read().await.clone()
    }

    /// Returns the number of remux calls performed.
    pub async fn job_count(&self) -> usize {
        self.inner.jobs.read().await.len()
    }

    /// Configures remuxes of the given input path to fail with exit code 1.
    pub async fn fail_input(&self, path: impl AsRef<Path>) {
        self.fail_input_with(path, 1, "mock transcoder failure")
            .await;
    }

    /// Configures remuxes of the given input path to fail with the given
    /// exit code and stderr text.
    pub async fn fail_input_with(&self, path: impl AsRef<Path>, code: i32, stderr: &str) {
        self.inner
            .failing_inputs
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), (code, stderr.to_string()));
    }

    /// Configures the next remux call to fail with the given error.
    pub async fn set_next_error(&self, error: RemuxError) {
        *self.inner.next_error.write().await = Some(error);
    }

    /// Disables writing stub output files on success.
    pub async fn set_skip_output_writes(&self, skip: bool) {
        *self.inner.skip_output_writes.write().await = skip;
    }

    async fn record(&self, job: &RemuxJob, success: bool) {
        self.inner.jobs.write().await.push(RecordedRemux {
            job: job.clone(),
            success,
        });
    }
}

#[async_trait]
impl Remuxer for MockRemuxer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn remux(&self, job: &RemuxJob) -> Result<RemuxResult, RemuxError> {
        if let Some(err) = self.inner.next_error.write().await.take() {
            self.record(job, false).await;
            return Err(err);
        }

        if let Some((code, stderr)) = self
            .inner
            .failing_inputs
            .read()
            .await
            .get(&job.input_path)
            .cloned()
        {
            self.record(job, false).await;
            return Err(RemuxError::ExitedNonZero {
                code: Some(code),
                stderr,
            });
        }

        let contents = b"mock remux output";
        if !*self.inner.skip_output_writes.read().await {
            tokio::fs::write(&job.output_path, contents)
                .await
                .map_err(|e| RemuxError::filesystem(&job.output_path, e))?;
        }

        self.record(job, true).await;
        Ok(RemuxResult {
            output_path: job.output_path.clone(),
            output_size_bytes: contents.len() as u64,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), RemuxError> {
        Ok(())
    }
}
