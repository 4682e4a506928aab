//! `datamodel-codegen` as the model generator

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::config::GeneratorConfig;
use crate::generation::{GenerationError, GenerationTarget, ModelGenerator};
use crate::infrastructure::shell::CommandExecutor;

/// Runs the `datamodel-codegen` CLI for OpenAPI input
pub struct DatamodelCodegen {
    executor: Arc<dyn CommandExecutor>,
    program: String,
    extra_args: Vec<String>,
    timeout: Duration,
}

impl DatamodelCodegen {
    pub fn new(executor: Arc<dyn CommandExecutor>, config: &GeneratorConfig) -> Self {
        Self {
            executor,
            program: config.program.clone(),
            extra_args: config.args.clone(),
            timeout: config.timeout(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Command-line arguments for one run
    pub fn arguments(&self, input: &Path, target: &GenerationTarget) -> Vec<String> {
        let mut args = vec![
            "--input".to_string(),
            input.to_string_lossy().to_string(),
            "--input-file-type".to_string(),
            "openapi".to_string(),
            "--output".to_string(),
            target.path().to_string_lossy().to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

#[async_trait]
impl ModelGenerator for DatamodelCodegen {
    async fn generate(
        &self,
        input: &Path,
        target: &GenerationTarget,
    ) -> Result<(), GenerationError> {
        let args = self.arguments(input, target);
        let working_dir = input
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        debug!(program = %self.program, ?args, "Invoking model generator");

        let result = tokio::time::timeout(
            self.timeout,
            self.executor.execute(&self.program, &args, working_dir),
        )
        .await
        .map_err(|_| GenerationError::Timeout {
            program: self.program.clone(),
            secs: self.timeout.as_secs(),
        })??;

        if !result.is_success() {
            return Err(GenerationError::CommandFailed {
                program: self.program.clone(),
                exit_code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}
