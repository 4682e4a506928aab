//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command-line overrides applied by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::{Error, Result};

/// Name of the per-user configuration directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "oasform";

/// File name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// External model generator invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Program to spawn
    pub program: String,
    /// Extra arguments appended after the input/output arguments
    pub args: Vec<String>,
    /// Upper bound for a single generator run
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "datamodel-codegen".to_string(),
            args: Vec::new(),
            timeout_secs: 120,
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Anchor a relative program path such as `./venv/bin/datamodel-codegen`
    /// at `base`. The generator runs inside a temporary workspace, where such
    /// a path would not resolve. Bare names are left for `PATH` lookup.
    pub fn resolve_program(&mut self, base: &Path) {
        let program = Path::new(&self.program);
        if program.is_relative() && program.components().count() > 1 {
            self.program = base.join(program).to_string_lossy().into_owned();
        }
    }
}

/// URL fetching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Names of the produced files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default archive path when none is given on the command line
    pub archive_name: String,
    /// File name of the assembled application inside the archive
    pub app_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            archive_name: "generated_code.zip".to_string(),
            app_file: "streamlit_app.py".to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or from the default location when `path`
    /// is `None`. A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (Some(path.to_path_buf()), true),
            None => (Self::default_path(), false),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !explicit && !tokio::fs::try_exists(&path).await? {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(path = %path.display(), "Loading configuration");
        let content = tokio::fs::read_to_string(&path).await?;
        Self::from_toml_str(&content)
    }

    /// `<config_dir>/oasform/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn validate(&self) -> Result<()> {
        if self.generator.program.trim().is_empty() {
            return Err(Error::config("generator.program must not be empty"));
        }
        if self.generator.timeout_secs == 0 || self.fetch.timeout_secs == 0 {
            return Err(Error::config("timeouts must be at least one second"));
        }
        if self.output.app_file.trim().is_empty() || self.output.app_file.contains('/') {
            return Err(Error::config(
                "output.app_file must be a plain file name",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.generator.program, "datamodel-codegen");
        assert!(config.generator.args.is_empty());
        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(config.output.archive_name, "generated_code.zip");
        assert_eq!(config.output.app_file, "streamlit_app.py");
    }

    #[test]
    fn test_config_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [generator]
            program = "/opt/venv/bin/datamodel-codegen"
            args = ["--use-annotated"]
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.program, "/opt/venv/bin/datamodel-codegen");
        assert_eq!(config.generator.args, vec!["--use-annotated".to_string()]);
        assert_eq!(config.generator.timeout_secs, 120);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_config_rejects_empty_program() {
        let result = Config::from_toml_str("[generator]\nprogram = \"  \"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_rejects_nested_app_file() {
        let result = Config::from_toml_str("[output]\napp_file = \"app/main.py\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_program_anchors_relative_paths() {
        let mut generator = GeneratorConfig {
            program: "./venv/bin/datamodel-codegen".to_string(),
            ..GeneratorConfig::default()
        };
        generator.resolve_program(Path::new("/home/dev/project"));
        assert_eq!(
            Path::new(&generator.program),
            Path::new("/home/dev/project/./venv/bin/datamodel-codegen")
        );
        assert!(Path::new(&generator.program).is_absolute());
    }

    #[test]
    fn test_resolve_program_keeps_bare_and_absolute_programs() {
        let mut bare = GeneratorConfig::default();
        bare.resolve_program(Path::new("/home/dev"));
        assert_eq!(bare.program, "datamodel-codegen");

        let mut absolute = GeneratorConfig {
            program: "/opt/venv/bin/datamodel-codegen".to_string(),
            ..GeneratorConfig::default()
        };
        absolute.resolve_program(Path::new("/home/dev"));
        assert_eq!(absolute.program, "/opt/venv/bin/datamodel-codegen");
    }

    #[tokio::test]
    async fn test_config_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[fetch]\ntimeout_secs = 3\n").unwrap();
        file.flush().unwrap();

        let config = Config::load(Some(file.path())).await.unwrap();
        assert_eq!(config.fetch.timeout_secs, 3);
    }

    #[tokio::test]
    async fn test_config_load_missing_explicit_file_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/oasform.toml"))).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
