//! Bundled example specification

use crate::generation::RawSpecification;

/// OpenAPI document shipped with the binary for demos
pub const EXAMPLE_SPEC: &str = include_str!("../../../assets/quote-oas.json");

/// The bundled example as raw specification text
pub fn example_spec() -> RawSpecification {
    RawSpecification::new(EXAMPLE_SPEC)
}
