//! Halt-and-prompt control flow.
//!
//! A pipeline step either produces its value or stops the current evaluation
//! with a [`Prompt`] telling the user what to supply. Stopping is not an
//! error: the caller shows the prompt and evaluates again once the input
//! changes.

use std::fmt;
use std::path::PathBuf;

/// Outcome of a pipeline step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    Ready(T),
    AwaitingInput(Prompt),
}

impl<T> Step<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Step::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Step::Ready(value) => Some(value),
            Step::AwaitingInput(_) => None,
        }
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        match self {
            Step::Ready(_) => None,
            Step::AwaitingInput(prompt) => Some(prompt),
        }
    }
}

/// Unwraps a `Step::Ready`, or returns `Ok(Step::AwaitingInput(..))` from the
/// enclosing function.
macro_rules! proceed {
    ($step:expr) => {
        match $step {
            $crate::core::Step::Ready(value) => value,
            $crate::core::Step::AwaitingInput(prompt) => {
                return Ok($crate::core::Step::AwaitingInput(prompt));
            }
        }
    };
}

pub(crate) use proceed;

/// What the user has to provide before the pipeline can continue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// No specification file was supplied
    UploadRequired,
    /// The supplied file is not JSON or YAML
    UnsupportedUpload { path: PathBuf },
    /// Pasted specification text is empty
    TextRequired,
    /// The URL is not a well-formed HTTP(S) URL
    InvalidUrl { url: String },
    /// Generation produced no model classes
    NoModelsFound,
    /// A requested model is not among the discovered ones
    UnknownModel {
        requested: String,
        available: Vec<String>,
    },
    /// Every model was deselected
    EmptySelection,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::UploadRequired => write!(f, "Upload a file to continue!"),
            Prompt::UnsupportedUpload { path } => write!(
                f,
                "Upload a JSON or YAML file (.json, .yaml, .yml) to continue! Got {}",
                path.display()
            ),
            Prompt::TextRequired => write!(f, "Enter OAS text to continue!"),
            Prompt::InvalidUrl { .. } => write!(f, "Enter a valid HTTP(S) URL to continue!"),
            Prompt::NoModelsFound => write!(f, "Couldn't find any models in the input!"),
            Prompt::UnknownModel {
                requested,
                available,
            } => write!(
                f,
                "Unknown model '{requested}'. Select from: {}",
                available.join(", ")
            ),
            Prompt::EmptySelection => write!(f, "Select at least one model to continue!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halts_early(step: Step<u32>) -> crate::core::Result<Step<u32>> {
        let value = proceed!(step);
        Ok(Step::Ready(value + 1))
    }

    #[test]
    fn test_proceed_passes_ready_values() {
        assert_eq!(halts_early(Step::Ready(1)).unwrap(), Step::Ready(2));
    }

    #[test]
    fn test_proceed_returns_prompt() {
        let result = halts_early(Step::AwaitingInput(Prompt::TextRequired)).unwrap();
        assert_eq!(result.prompt(), Some(&Prompt::TextRequired));
    }

    #[test]
    fn test_step_ready() {
        let step = Step::Ready(20);
        assert!(step.is_ready());
        assert_eq!(step.ready(), Some(20));

        let halted: Step<u32> = Step::AwaitingInput(Prompt::NoModelsFound);
        assert!(!halted.is_ready());
        assert_eq!(halted.ready(), None);
    }

    #[test]
    fn test_prompt_messages() {
        assert_eq!(Prompt::UploadRequired.to_string(), "Upload a file to continue!");
        assert_eq!(Prompt::TextRequired.to_string(), "Enter OAS text to continue!");
        assert_eq!(
            Prompt::InvalidUrl {
                url: "example.com".to_string()
            }
            .to_string(),
            "Enter a valid HTTP(S) URL to continue!"
        );
        assert_eq!(
            Prompt::NoModelsFound.to_string(),
            "Couldn't find any models in the input!"
        );
        let unknown = Prompt::UnknownModel {
            requested: "models.Nope".to_string(),
            available: vec!["models.Quote".to_string(), "models.Author".to_string()],
        };
        assert_eq!(
            unknown.to_string(),
            "Unknown model 'models.Nope'. Select from: models.Quote, models.Author"
        );
    }
}
