//! External model generators

pub mod datamodel_codegen;

pub use datamodel_codegen::DatamodelCodegen;
