//! oasform: OpenAPI specification to pydantic models and a Streamlit form app.
//!
//! The pipeline runs in four stages. A raw specification is acquired from the
//! bundled example, a file, pasted text, or a URL. An external generator turns
//! it into Python modules, which are scanned for class definitions without
//! being executed. The selected classes are templated into a small
//! application and everything is packaged into a zip archive.
//!
//! [`application::Session`] drives the stages and memoizes the expensive ones.
#![deny(unsafe_code)]

pub mod application;
pub mod assembly;
pub mod core;
pub mod generation;
pub mod infrastructure;
pub mod packaging;
