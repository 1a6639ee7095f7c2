//! Trait definitions for the remux module.

use async_trait::async_trait;

use super::error::RemuxError;
use super::types::{RemuxJob, RemuxResult};

/// A remuxer that repackages media streams into a new container.
#[async_trait]
pub trait Remuxer: Send + Sync {
    /// Returns the name of this remuxer implementation.
    fn name(&self) -> &str;

    /// Remuxes one file, blocking until the underlying process exits.
    ///
    /// Captures the process output rather than streaming it; there is no
    /// timeout or cancellation hook.
    async fn remux(&self, job: &RemuxJob) -> Result<RemuxResult, RemuxError>;

    /// Validates that the remuxer is properly configured and ready.
    async fn validate(&self) -> Result<(), RemuxError>;
}
