//! Command executor for running external programs
//!
//! The model generator is a separate program; this module spawns it directly
//! (no shell), so paths and arguments never need quoting.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::generation::GenerationError;

/// Trait for executing external programs
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` in the given working directory
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult, GenerationError>;
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command was successful
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Default command executor using tokio::process
#[derive(Debug, Default)]
pub struct ProcessCommandExecutor;

impl ProcessCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult, GenerationError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| GenerationError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Mock command executor for testing
#[cfg(test)]
pub struct MockCommandExecutor {
    pub result: CommandResult,
    pub invocations: std::sync::Mutex<Vec<Vec<String>>>,
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn with_result(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            result: CommandResult {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            invocations: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Program followed by its arguments, per call
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for MockCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        _working_dir: &Path,
    ) -> Result<CommandResult, GenerationError> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.invocations.lock().unwrap().push(call);
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_executor_success() {
        let executor = ProcessCommandExecutor::new();
        let dir = tempdir().unwrap();

        let result = executor
            .execute("echo", &["hello".to_string()], dir.path())
            .await
            .unwrap();

        assert!(result.is_success());
        assert!(result.stdout.contains("hello"));
        assert!(result.stderr.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_executor_failure_exit_code() {
        let executor = ProcessCommandExecutor::new();
        let dir = tempdir().unwrap();

        let result = executor
            .execute(
                "sh",
                &["-c".to_string(), "echo oops >&2; exit 3".to_string()],
                dir.path(),
            )
            .await
            .unwrap();

        assert!(!result.is_success());
        assert_eq!(result.exit_code, 3);
        assert!(result.stderr.contains("oops"));
    }

    #[tokio::test]
    async fn test_process_executor_missing_program() {
        let executor = ProcessCommandExecutor::new();
        let dir = tempdir().unwrap();

        let result = executor
            .execute("oasform-definitely-not-installed", &[], dir.path())
            .await;

        assert!(matches!(result, Err(GenerationError::Spawn { .. })));
    }
}
