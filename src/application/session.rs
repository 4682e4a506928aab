//! One user's pipeline: acquire, generate, introspect, select, assemble, package.
//!
//! A session is evaluated top to bottom every time its input changes. The
//! expensive steps are memoized by argument value, so a re-evaluation that
//! only changes the model selection reuses the generated modules.

use std::sync::Arc;
use tracing::{debug, info};

use crate::application::cache::{CacheStats, StepCache};
use crate::assembly::{
    ModelSelection, assemble_application, available_models, resolve_selection,
    selection_from_indices,
};
use crate::core::{Config, Prompt, Result, Step, proceed};
use crate::generation::{
    GeneratedModule, ModelGenerator, ModelRef, RawSpecification, SpecFetcher, parse_into_modules,
};
use crate::infrastructure::codegen::DatamodelCodegen;
use crate::infrastructure::openapi::{
    FileSpecLoader, HttpSpecFetcher, SpecSource, example_spec, validate_text, validate_url,
};
use crate::infrastructure::shell::ProcessCommandExecutor;
use crate::packaging::{Artifact, build_archive, layout};

/// How the user picked models
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionRequest {
    /// The first discovered model
    #[default]
    Default,
    /// `module.Class` (or bare `Class`) names
    Named(Vec<String>),
    /// Positions in the list of available models
    Indices(Vec<usize>),
}

/// Everything the user controls in one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInput {
    pub source: SpecSource,
    pub selection: SelectionRequest,
}

/// Everything one evaluation produced
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub raw: RawSpecification,
    pub modules: Vec<GeneratedModule>,
    pub available: Vec<ModelRef>,
    pub selection: ModelSelection,
    pub app_code: String,
    pub artifacts: Vec<Artifact>,
    pub archive: Vec<u8>,
}

/// Cache statistics for every memoized step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub uploads: CacheStats,
    pub fetches: CacheStats,
    pub modules: CacheStats,
    pub applications: CacheStats,
    pub archives: CacheStats,
}

pub struct Session {
    generator: Arc<dyn ModelGenerator>,
    fetcher: Arc<dyn SpecFetcher>,
    uploads: FileSpecLoader,
    app_file: String,
    upload_cache: StepCache<RawSpecification>,
    fetch_cache: StepCache<RawSpecification>,
    module_cache: StepCache<Vec<GeneratedModule>>,
    app_cache: StepCache<String>,
    archive_cache: StepCache<Vec<u8>>,
}

impl Session {
    pub fn new(
        generator: Arc<dyn ModelGenerator>,
        fetcher: Arc<dyn SpecFetcher>,
        app_file: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            fetcher,
            uploads: FileSpecLoader::new(),
            app_file: app_file.into(),
            upload_cache: StepCache::new("upload"),
            fetch_cache: StepCache::new("fetch"),
            module_cache: StepCache::new("modules"),
            app_cache: StepCache::new("application"),
            archive_cache: StepCache::new("archive"),
        }
    }

    /// Session backed by `datamodel-codegen` and a real HTTP client
    pub fn from_config(config: &Config) -> Result<Self> {
        let executor = Arc::new(ProcessCommandExecutor::new());
        let generator = DatamodelCodegen::new(executor, &config.generator);
        let fetcher = HttpSpecFetcher::new(config.fetch.timeout())?;
        Ok(Self::new(
            Arc::new(generator),
            Arc::new(fetcher),
            config.output.app_file.clone(),
        ))
    }

    /// Obtain raw specification text from `source`
    pub async fn acquire(&mut self, source: &SpecSource) -> Result<Step<RawSpecification>> {
        debug!(source = source.kind(), "Acquiring specification");
        match source {
            SpecSource::Example => Ok(Step::Ready(example_spec())),
            SpecSource::Upload(path) => {
                let fingerprint = proceed!(self.uploads.validate(path.as_deref()).await?);
                let uploads = &self.uploads;
                let raw = self
                    .upload_cache
                    .get_or_try_insert_with_async(&fingerprint, || {
                        uploads.decode(&fingerprint.path)
                    })
                    .await?;
                Ok(Step::Ready(raw))
            }
            SpecSource::Text(text) => Ok(validate_text(text)),
            SpecSource::Url(raw_url) => {
                let url = proceed!(validate_url(raw_url));
                let fetcher = Arc::clone(&self.fetcher);
                let key = url.to_string();
                let raw = self
                    .fetch_cache
                    .get_or_try_insert_with_async(&key, || async move {
                        Ok(fetcher.fetch(&url).await)
                    })
                    .await?;
                Ok(Step::Ready(raw))
            }
        }
    }

    /// Generate and introspect modules for `raw`; no modules halts the session
    pub async fn modules(&mut self, raw: &RawSpecification) -> Result<Step<Vec<GeneratedModule>>> {
        let generator = Arc::clone(&self.generator);
        let modules = self
            .module_cache
            .get_or_try_insert_with_async(raw, || async move {
                parse_into_modules(generator.as_ref(), raw).await
            })
            .await?;

        if modules.is_empty() {
            return Ok(Step::AwaitingInput(Prompt::NoModelsFound));
        }
        Ok(Step::Ready(modules))
    }

    /// Application source for `selection`
    pub fn assemble(&mut self, selection: &ModelSelection) -> Result<String> {
        self.app_cache
            .get_or_try_insert_with(selection, || assemble_application(selection))
    }

    /// Archive bytes for `modules` plus `app_code`
    pub fn package(
        &mut self,
        modules: &[GeneratedModule],
        app_code: &str,
    ) -> Result<(Vec<Artifact>, Vec<u8>)> {
        let artifacts = layout(modules, app_code, &self.app_file);
        let archive = self
            .archive_cache
            .get_or_try_insert_with(&(modules, app_code, &self.app_file), || {
                build_archive(&artifacts)
            })?;
        Ok((artifacts, archive))
    }

    /// Run the whole pipeline for `input`
    pub async fn evaluate(&mut self, input: &SessionInput) -> Result<Step<Evaluation>> {
        let raw = proceed!(self.acquire(&input.source).await?);
        if let Some(summary) = raw.summary() {
            info!(title = %summary.title, version = %summary.version, "Loaded specification");
        }

        let modules = proceed!(self.modules(&raw).await?);
        let available = available_models(&modules);

        let selection = proceed!(match &input.selection {
            SelectionRequest::Default => resolve_selection(&available, &[]),
            SelectionRequest::Named(names) => resolve_selection(&available, names),
            SelectionRequest::Indices(indices) if available.len() > 1 => {
                selection_from_indices(&available, indices)
            }
            SelectionRequest::Indices(_) => resolve_selection(&available, &[]),
        });
        info!(
            selected = %selection
                .models()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "Selected form models"
        );

        let app_code = self.assemble(&selection)?;
        let (artifacts, archive) = self.package(&modules, &app_code)?;

        Ok(Step::Ready(Evaluation {
            raw,
            modules,
            available,
            selection,
            app_code,
            artifacts,
            archive,
        }))
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            uploads: self.upload_cache.stats(),
            fetches: self.fetch_cache.stats(),
            modules: self.module_cache.stats(),
            applications: self.app_cache.stats(),
            archives: self.archive_cache.stats(),
        }
    }
}
