//! Packaging generated modules and the application for download

pub mod archive;
pub mod layout;

pub use archive::build_archive;
pub use layout::{Artifact, layout};
