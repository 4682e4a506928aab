//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::path::{Component, Path};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::application::OutputService;
use crate::core::{Error, Result};
use crate::packaging::Artifact;

/// Output service that writes archives and artifacts to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

async fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            Error::output(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    create_parent(path).await?;

    let mut file = fs::File::create(path).await.map_err(|e| {
        Error::output(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    file.write_all(bytes).await.map_err(|e| {
        Error::output(format!("Failed to write file {}: {}", path.display(), e))
    })?;
    file.flush().await.map_err(|e| {
        Error::output(format!("Failed to flush file {}: {}", path.display(), e))
    })?;
    Ok(())
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_archive(&self, archive: &[u8], path: &Path) -> Result<()> {
        write_file(path, archive).await?;
        info!(path = %path.display(), bytes = archive.len(), "Wrote archive");
        Ok(())
    }

    async fn write_artifacts(&self, artifacts: &[Artifact], root: &Path) -> Result<()> {
        for artifact in artifacts {
            // Artifact paths come from module names; keep them below `root`.
            if artifact
                .path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
            {
                return Err(Error::output(format!(
                    "Refusing to write outside {}: {}",
                    root.display(),
                    artifact.path.display()
                )));
            }

            let target = root.join(&artifact.path);
            write_file(&target, artifact.content.as_bytes()).await?;
            debug!(path = %target.display(), "Wrote artifact");
        }

        info!(root = %root.display(), files = artifacts.len(), "Unpacked artifacts");
        Ok(())
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}
