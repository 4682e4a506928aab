//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a single generator run.
///
/// These never reach the user directly: the fallback logic retries in the
/// other mode and reports an empty result when both runs fail.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with code {exit_code}: {stderr}")]
    CommandFailed {
        program: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("'{program}' did not finish within {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("Generator reported success but {0} was not written")]
    MissingOutput(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
