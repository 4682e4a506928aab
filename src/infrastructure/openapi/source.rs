//! Input methods for the raw specification

use std::fmt;
use std::path::PathBuf;

use crate::core::{Prompt, Step};
use crate::generation::RawSpecification;

/// Where the specification text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// The bundled example document
    Example,
    /// A JSON or YAML file chosen by the user, if any
    Upload(Option<PathBuf>),
    /// Pasted text
    Text(String),
    /// A URL hosting the document
    Url(String),
}

impl SpecSource {
    /// Short label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            SpecSource::Example => "example",
            SpecSource::Upload(_) => "upload",
            SpecSource::Text(_) => "text",
            SpecSource::Url(_) => "url",
        }
    }
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecSource::Example => write!(f, "Example OpenAPI Specification"),
            SpecSource::Upload(_) => write!(f, "Upload an OpenAPI Specification"),
            SpecSource::Text(_) => write!(f, "Enter OpenAPI Specification in Text Input"),
            SpecSource::Url(_) => write!(f, "Fetch OpenAPI Specification from a URL"),
        }
    }
}

/// Pasted text must contain something other than whitespace
pub fn validate_text(text: &str) -> Step<RawSpecification> {
    if text.trim().is_empty() {
        Step::AwaitingInput(Prompt::TextRequired)
    } else {
        Step::Ready(RawSpecification::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_rejects_empty_and_whitespace() {
        assert_eq!(validate_text("").prompt(), Some(&Prompt::TextRequired));
        assert_eq!(validate_text(" \n\t ").prompt(), Some(&Prompt::TextRequired));
    }

    #[test]
    fn test_validate_text_keeps_text_verbatim() {
        let raw = validate_text("  openapi: 3.0.0\n").ready().unwrap();
        assert_eq!(raw.as_str(), "  openapi: 3.0.0\n");
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(SpecSource::Example.kind(), "example");
        assert_eq!(
            SpecSource::Url("https://x".to_string()).to_string(),
            "Fetch OpenAPI Specification from a URL"
        );
    }
}
