//! Scripted `ModelGenerator` for tests

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

use crate::generation::{GenerationError, GenerationTarget, ModelGenerator};

/// What a scripted run does for one mode
#[derive(Debug, Clone)]
enum Outcome {
    Fail,
    /// Exit successfully without writing anything
    Silent,
    /// Write the files, then fail
    Partial(Vec<(String, String)>),
    Write(Vec<(String, String)>),
}

/// Generator whose behaviour per mode is fixed up front.
///
/// Records the mode of every call so tests can assert on fallback order.
#[derive(Debug)]
pub struct ScriptedGenerator {
    single: Outcome,
    directory: Outcome,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedGenerator {
    fn new(single: Outcome, directory: Outcome) -> Self {
        Self {
            single,
            directory,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Single-file mode writes `models.py` with `code`
    pub fn single(code: &str) -> Self {
        Self::new(
            Outcome::Write(vec![(String::new(), code.to_string())]),
            Outcome::Fail,
        )
    }

    /// Single-file mode fails; directory mode writes `files`
    pub fn directory(files: &[(&str, &str)]) -> Self {
        Self::new(Outcome::Fail, Outcome::Fail).with_directory(files)
    }

    /// Both modes fail
    pub fn failing() -> Self {
        Self::new(Outcome::Fail, Outcome::Fail)
    }

    /// Single-file mode reports success without writing the file
    pub fn silent_single() -> Self {
        Self::new(Outcome::Silent, Outcome::Fail)
    }

    /// Single-file mode writes `code` and then fails
    pub fn partial_single(code: &str) -> Self {
        Self::new(
            Outcome::Partial(vec![(String::new(), code.to_string())]),
            Outcome::Fail,
        )
    }

    pub fn with_directory(mut self, files: &[(&str, &str)]) -> Self {
        self.directory = Outcome::Write(
            files
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        );
        self
    }

    /// Modes invoked so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _input: &Path,
        target: &GenerationTarget,
    ) -> Result<(), GenerationError> {
        self.calls.lock().unwrap().push(target.mode());

        let outcome = match target {
            GenerationTarget::SingleFile(_) => &self.single,
            GenerationTarget::Directory(_) => &self.directory,
        };

        let write = |files: &[(String, String)]| -> std::io::Result<()> {
            for (name, code) in files {
                // An empty name means "the target itself" in single-file mode.
                let path = match target {
                    GenerationTarget::SingleFile(path) => path.clone(),
                    GenerationTarget::Directory(dir) => dir.join(name),
                };
                std::fs::write(path, code)?;
            }
            Ok(())
        };

        match outcome {
            Outcome::Fail => Err(GenerationError::CommandFailed {
                program: "scripted".to_string(),
                exit_code: 1,
                stderr: "scripted failure".to_string(),
            }),
            Outcome::Silent => Ok(()),
            Outcome::Partial(files) => {
                write(files.as_slice())?;
                Err(GenerationError::CommandFailed {
                    program: "scripted".to_string(),
                    exit_code: 2,
                    stderr: "partial output".to_string(),
                })
            }
            Outcome::Write(files) => {
                write(files.as_slice())?;
                Ok(())
            }
        }
    }
}
