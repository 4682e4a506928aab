//! Choosing which discovered models become form inputs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Prompt, Step};
use crate::generation::{GeneratedModule, ModelRef};

/// Every (module, class) pair across `modules`, module order then class order
pub fn available_models(modules: &[GeneratedModule]) -> Vec<ModelRef> {
    modules
        .iter()
        .flat_map(|module| {
            module
                .classes
                .iter()
                .map(|class_name| ModelRef::new(&module.name, class_name))
        })
        .collect()
}

/// Ordered, duplicate-free, non-empty set of selected models
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSelection(Vec<ModelRef>);

impl ModelSelection {
    /// Build a selection, dropping repeated pairs. Returns `None` when empty.
    pub fn new(models: impl IntoIterator<Item = ModelRef>) -> Option<Self> {
        let mut unique: Vec<ModelRef> = Vec::new();
        for model in models {
            if !unique.contains(&model) {
                unique.push(model);
            }
        }
        (!unique.is_empty()).then_some(Self(unique))
    }

    pub fn models(&self) -> &[ModelRef] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn class_names(&self) -> Vec<String> {
        self.0.iter().map(|m| m.class_name.clone()).collect()
    }
}

/// Resolve the user's requested models against what was discovered.
///
/// - nothing discovered: prompt, there is nothing to build a form from
/// - exactly one pair: it is selected whatever was requested
/// - nothing requested: the first pair, like a multi-select default
///
/// Requests are `module.Class`; a bare `Class` works when only one module
/// defines it.
pub fn resolve_selection(available: &[ModelRef], requested: &[String]) -> Step<ModelSelection> {
    let Some(first) = available.first() else {
        return Step::AwaitingInput(Prompt::NoModelsFound);
    };

    if available.len() == 1 || requested.is_empty() {
        debug!(model = %first, "Using default model selection");
        return Step::Ready(ModelSelection(vec![first.clone()]));
    }

    let mut chosen = Vec::with_capacity(requested.len());
    for request in requested {
        match find_model(available, request) {
            Some(model) => chosen.push(model.clone()),
            None => {
                return Step::AwaitingInput(Prompt::UnknownModel {
                    requested: request.clone(),
                    available: available.iter().map(ToString::to_string).collect(),
                });
            }
        }
    }

    match ModelSelection::new(chosen) {
        Some(selection) => Step::Ready(selection),
        None => Step::AwaitingInput(Prompt::EmptySelection),
    }
}

/// Selection from positions in `available`, as returned by a multi-select widget
pub fn selection_from_indices(available: &[ModelRef], indices: &[usize]) -> Step<ModelSelection> {
    let chosen = indices.iter().filter_map(|&i| available.get(i).cloned());
    match ModelSelection::new(chosen) {
        Some(selection) => Step::Ready(selection),
        None => Step::AwaitingInput(Prompt::EmptySelection),
    }
}

fn find_model<'a>(available: &'a [ModelRef], request: &str) -> Option<&'a ModelRef> {
    let request = request.trim();
    if let Some(exact) = available.iter().find(|m| m.to_string() == request) {
        return Some(exact);
    }

    let mut by_class = available.iter().filter(|m| m.class_name == request);
    match (by_class.next(), by_class.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}
