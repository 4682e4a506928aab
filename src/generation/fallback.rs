//! Single-file generation with a multi-file fallback

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::core::Result;
use crate::generation::{GenerationError, GenerationTarget, ModelGenerator, RawSpecification};

/// File written by single-file generation
pub const SINGLE_MODULE_FILE: &str = "models.py";

/// Sub-directory of the workspace that receives generator output
const OUTPUT_DIR: &str = "generated";

/// Generate Python modules for `raw` inside `workspace`.
///
/// Tries one output file first; if that run fails for any reason, tries again
/// with a directory target and returns every module it produced. When both
/// runs fail the result is empty. Blank input never reaches the generator.
///
/// Only local I/O on the workspace is reported as an error.
pub async fn generate_module_or_modules(
    generator: &dyn ModelGenerator,
    raw: &RawSpecification,
    workspace: &Path,
) -> Result<Vec<PathBuf>> {
    if raw.is_blank() {
        warn!("Specification text is empty, skipping generation");
        return Ok(Vec::new());
    }

    // The input lives beside, not inside, the output directory so directory
    // listings only ever see generated files.
    let input = workspace.join(format!("openapi.{}", raw.format().file_extension()));
    let output_dir = workspace.join(OUTPUT_DIR);
    fs::write(&input, raw.as_str()).await?;
    fs::create_dir_all(&output_dir).await?;

    let single = GenerationTarget::SingleFile(output_dir.join(SINGLE_MODULE_FILE));
    match run(generator, &input, &single).await {
        Ok(()) => {
            info!(mode = single.mode(), "Generated models");
            return Ok(vec![single.path().to_path_buf()]);
        }
        Err(e) => {
            warn!(mode = single.mode(), error = %e, "Generation failed, retrying in multi-file mode");
        }
    }

    // Drop anything the failed attempt left behind; attempts are never merged.
    fs::remove_dir_all(&output_dir).await?;
    fs::create_dir_all(&output_dir).await?;

    let directory = GenerationTarget::Directory(output_dir.clone());
    match run(generator, &input, &directory).await {
        Ok(()) => {
            let modules = list_modules(&output_dir).await?;
            info!(mode = directory.mode(), count = modules.len(), "Generated models");
            Ok(modules)
        }
        Err(e) => {
            warn!(mode = directory.mode(), error = %e, "Generation failed in both modes");
            Ok(Vec::new())
        }
    }
}

async fn run(
    generator: &dyn ModelGenerator,
    input: &Path,
    target: &GenerationTarget,
) -> std::result::Result<(), GenerationError> {
    debug!(mode = target.mode(), target = %target.path().display(), "Running generator");
    generator.generate(input, target).await?;

    if let GenerationTarget::SingleFile(path) = target {
        if !fs::try_exists(path).await? {
            return Err(GenerationError::MissingOutput(path.clone()));
        }
    }
    Ok(())
}

/// Regular `.py` files directly inside `dir`, sorted by name
async fn list_modules(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut modules = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_python = path.extension().and_then(|ext| ext.to_str()) == Some("py");
        if is_python && entry.file_type().await?.is_file() {
            modules.push(path);
        }
    }
    modules.sort();
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::ScriptedGenerator;
    use tempfile::tempdir;

    const QUOTE: &str = "class Quote:\n    pass\n";

    #[tokio::test]
    async fn test_single_file_success_skips_fallback() {
        let workspace = tempdir().unwrap();
        let generator = ScriptedGenerator::single(QUOTE);

        let files = generate_module_or_modules(
            &generator,
            &RawSpecification::new("openapi: 3.0.0"),
            workspace.path(),
        )
        .await
        .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("models.py"));
        assert_eq!(generator.calls(), vec!["single-file"]);
    }

    #[tokio::test]
    async fn test_fallback_to_directory_mode() {
        let workspace = tempdir().unwrap();
        let generator = ScriptedGenerator::directory(&[
            ("orders.py", "class Order:\n    pass\n"),
            ("__init__.py", ""),
            ("common.py", "class Money:\n    pass\n"),
        ]);

        let files = generate_module_or_modules(
            &generator,
            &RawSpecification::new("openapi: 3.0.0"),
            workspace.path(),
        )
        .await
        .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["__init__.py", "common.py", "orders.py"]);
        assert_eq!(generator.calls(), vec!["single-file", "multi-file"]);
    }

    #[tokio::test]
    async fn test_both_modes_failing_yields_empty() {
        let workspace = tempdir().unwrap();
        let generator = ScriptedGenerator::failing();

        let files = generate_module_or_modules(
            &generator,
            &RawSpecification::new("not an api"),
            workspace.path(),
        )
        .await
        .unwrap();

        assert!(files.is_empty());
        assert_eq!(generator.calls(), vec!["single-file", "multi-file"]);
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_generator() {
        let workspace = tempdir().unwrap();
        let generator = ScriptedGenerator::single(QUOTE);

        let files =
            generate_module_or_modules(&generator, &RawSpecification::new("  \n"), workspace.path())
                .await
                .unwrap();

        assert!(files.is_empty());
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_without_output_file_falls_back() {
        let workspace = tempdir().unwrap();
        let generator = ScriptedGenerator::silent_single().with_directory(&[("api.py", QUOTE)]);

        let files = generate_module_or_modules(
            &generator,
            &RawSpecification::new("{}"),
            workspace.path(),
        )
        .await
        .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("api.py"));
    }

    #[tokio::test]
    async fn test_partial_single_file_output_is_discarded() {
        let workspace = tempdir().unwrap();
        let generator = ScriptedGenerator::partial_single("class Broken:\n")
            .with_directory(&[("pets.py", QUOTE)]);

        let files = generate_module_or_modules(
            &generator,
            &RawSpecification::new("openapi: 3.1.0"),
            workspace.path(),
        )
        .await
        .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("pets.py"));
    }
}
