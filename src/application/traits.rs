//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::core::Result;
use crate::packaging::Artifact;

/// Destination for a finished evaluation
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write the zip archive to `path`, creating parent directories
    async fn write_archive(&self, archive: &[u8], path: &Path) -> Result<()>;

    /// Write every artifact below `root`, keeping its relative path
    async fn write_artifacts(&self, artifacts: &[Artifact], root: &Path) -> Result<()>;
}
