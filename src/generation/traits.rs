//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::path::Path;
use url::Url;

use crate::generation::{GenerationError, GenerationTarget, RawSpecification};

/// Turns an OpenAPI document on disk into Python model source files
#[async_trait]
pub trait ModelGenerator: Send + Sync {
    /// Run one generation attempt writing to `target`
    async fn generate(&self, input: &Path, target: &GenerationTarget)
    -> Result<(), GenerationError>;
}

/// Fetches specification text over HTTP(S)
#[async_trait]
pub trait SpecFetcher: Send + Sync {
    /// Fetch the document body. Transport failures yield empty text.
    async fn fetch(&self, url: &Url) -> RawSpecification;
}
