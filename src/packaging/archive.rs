//! Zip archive construction

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::core::Result;
use crate::packaging::Artifact;

/// Default permissions for every archived file
const FILE_MODE: u32 = 0o644;

/// Zip `artifacts` in order.
///
/// Timestamps and permissions are fixed, so the same artifacts always produce
/// the same bytes.
pub fn build_archive(artifacts: &[Artifact]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(FILE_MODE);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for artifact in artifacts {
        // Zip entry names always use forward slashes.
        let name = artifact
            .path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        writer.start_file(name, options)?;
        writer.write_all(artifact.content.as_bytes())?;
    }

    let bytes = writer.finish()?.into_inner();
    tracing::debug!(entries = artifacts.len(), bytes = bytes.len(), "Built archive");
    Ok(bytes)
}
