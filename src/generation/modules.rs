//! Generation plus introspection: raw specification to `GeneratedModule`s

use tokio::fs;
use tracing::{debug, info};

use crate::core::Result;
use crate::generation::{
    GeneratedModule, ModelGenerator, RawSpecification, discover_classes,
    generate_module_or_modules,
};

/// Generate modules for `raw` in a throwaway directory and read them back.
///
/// An empty result means no models were found; callers treat it as a
/// prompt for different input rather than a failure.
pub async fn parse_into_modules(
    generator: &dyn ModelGenerator,
    raw: &RawSpecification,
) -> Result<Vec<GeneratedModule>> {
    let workspace = tempfile::tempdir()?;
    let files = generate_module_or_modules(generator, raw, workspace.path()).await?;

    let mut modules = Vec::with_capacity(files.len());
    for file in files {
        let code = fs::read_to_string(&file).await?;
        let name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let classes = discover_classes(&code, &name)?;
        debug!(module = %name, classes = classes.len(), "Introspected module");
        modules.push(GeneratedModule {
            name,
            code,
            classes,
        });
    }

    info!(modules = modules.len(), "Parsed generated modules");
    Ok(modules)
}
