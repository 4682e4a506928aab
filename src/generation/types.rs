//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Module name that is importable without a package qualifier.
///
/// Single-file generation writes `models.py`; multi-file generation writes a
/// `models/` package, so every other module lives under `models.`.
pub const ROOT_MODULE: &str = "models";

/// Raw OpenAPI document text, JSON or YAML, never validated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSpecification(String);

impl RawSpecification {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Empty text produced by a failed fetch
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn format(&self) -> SpecFormat {
        if self.0.trim_start().starts_with('{') {
            SpecFormat::Json
        } else {
            SpecFormat::Yaml
        }
    }

    /// Best-effort title and version for log lines.
    ///
    /// YAML is a superset of JSON, so one parser covers both formats. Returns
    /// `None` for anything that does not look like an `info` block.
    pub fn summary(&self) -> Option<SpecSummary> {
        let value: serde_yaml::Value = serde_yaml::from_str(&self.0).ok()?;
        let info = value.get("info")?;
        Some(SpecSummary {
            title: info.get("title")?.as_str()?.to_string(),
            version: info
                .get("version")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            format: self.format(),
        })
    }
}

impl fmt::Display for RawSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialization format of a raw specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            SpecFormat::Json => "json",
            SpecFormat::Yaml => "yaml",
        }
    }
}

/// Title and version of a specification, for logging only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSummary {
    pub title: String,
    pub version: String,
    pub format: SpecFormat,
}

/// One generated Python module and the classes it defines
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedModule {
    /// File stem of the generated file
    pub name: String,
    /// Source text
    pub code: String,
    /// Top-level class names in source order
    pub classes: Vec<String>,
}

impl GeneratedModule {
    /// Python import path used by the assembled application
    pub fn import_path(&self) -> String {
        import_path(&self.name)
    }

    /// File name inside the archive
    pub fn file_name(&self) -> String {
        format!("{}.py", self.name)
    }
}

/// Python import path for a generated module.
///
/// ```
/// use oasform::generation::import_path;
///
/// assert_eq!(import_path("models"), "models");
/// assert_eq!(import_path("orders"), "models.orders");
/// ```
pub fn import_path(module: &str) -> String {
    if module == ROOT_MODULE {
        module.to_string()
    } else {
        format!("{ROOT_MODULE}.{module}")
    }
}

/// A (module, class) pair that can become a form input
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelRef {
    pub module: String,
    pub class_name: String,
}

impl ModelRef {
    pub fn new(module: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            class_name: class_name.into(),
        }
    }

    pub fn import_path(&self) -> String {
        import_path(&self.module)
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.class_name)
    }
}

/// Where a generator run should write its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationTarget {
    /// Everything in one module file
    SingleFile(PathBuf),
    /// A package of module files inside the directory
    Directory(PathBuf),
}

impl GenerationTarget {
    pub fn path(&self) -> &std::path::Path {
        match self {
            GenerationTarget::SingleFile(path) | GenerationTarget::Directory(path) => path,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            GenerationTarget::SingleFile(_) => "single-file",
            GenerationTarget::Directory(_) => "multi-file",
        }
    }
}
