//! Uploaded specification files
//!
//! Only file I/O and decoding happen here; the text is passed on untouched.

use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tokio::fs;

use crate::core::{Error, Prompt, Result, Step};
use crate::generation::RawSpecification;

/// Accepted upload extensions
pub const UPLOAD_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Identity of an upload's content, used as a memoization key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFingerprint {
    pub path: PathBuf,
    pub len: u64,
    pub modified_nanos: u128,
}

/// Loads uploaded JSON or YAML specification files
#[derive(Debug, Default)]
pub struct FileSpecLoader;

impl FileSpecLoader {
    pub fn new() -> Self {
        Self
    }

    /// Check that an upload was given, exists, and has an accepted extension.
    pub async fn validate(&self, path: Option<&Path>) -> Result<Step<UploadFingerprint>> {
        let Some(path) = path else {
            return Ok(Step::AwaitingInput(Prompt::UploadRequired));
        };

        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| UPLOAD_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !accepted {
            return Ok(Step::AwaitingInput(Prompt::UnsupportedUpload {
                path: path.to_path_buf(),
            }));
        }

        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Uploaded file does not exist");
                return Ok(Step::AwaitingInput(Prompt::UploadRequired));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Ok(Step::AwaitingInput(Prompt::UploadRequired));
        }

        let modified_nanos = metadata
            .modified()
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();

        Ok(Step::Ready(UploadFingerprint {
            path: path.to_path_buf(),
            len: metadata.len(),
            modified_nanos,
        }))
    }

    /// Read and decode the upload as UTF-8
    pub async fn decode(&self, path: &Path) -> Result<RawSpecification> {
        let bytes = fs::read(path).await?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Decode(format!("{} is not UTF-8: {e}", path.display())))?;
        Ok(RawSpecification::new(text))
    }
}
