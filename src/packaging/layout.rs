//! Placement of generated files inside the download

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::generation::{GeneratedModule, ROOT_MODULE};

/// A file to be packaged, with its path relative to the archive root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Lay out modules and the application for packaging.
///
/// A lone module sits at the root next to the application; several modules
/// go into the `models/` package the application imports from.
pub fn layout(modules: &[GeneratedModule], app_code: &str, app_file: &str) -> Vec<Artifact> {
    let flat = modules.len() == 1;
    let mut artifacts: Vec<Artifact> = modules
        .iter()
        .map(|module| {
            let path = if flat {
                PathBuf::from(module.file_name())
            } else {
                PathBuf::from(ROOT_MODULE).join(module.file_name())
            };
            Artifact {
                path,
                content: module.code.clone(),
            }
        })
        .collect();

    artifacts.push(Artifact {
        path: PathBuf::from(app_file),
        content: app_code.to_string(),
    });
    artifacts
}
