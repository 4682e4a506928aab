//! Selection of form models and assembly of the application source

pub mod application;
pub mod selection;

pub use application::{assemble_application, trailer};
pub use selection::{
    ModelSelection, available_models, resolve_selection, selection_from_indices,
};
