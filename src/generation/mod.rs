//! Generation domain: turns a raw specification into Python model modules.
//!
//! Code generation itself is delegated to an external [`ModelGenerator`];
//! this module owns the single-file/multi-file fallback and the static
//! discovery of the classes each generated module defines.

pub mod errors;
pub mod fallback;
pub mod introspection;
pub mod modules;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use errors::*;
pub use fallback::*;
pub use introspection::*;
pub use modules::*;
pub use traits::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_path_root_module_is_unqualified() {
        assert_eq!(import_path("models"), "models");
        assert_eq!(ModelRef::new("models", "Quote").import_path(), "models");
    }

    #[test]
    fn test_import_path_other_modules_are_qualified() {
        assert_eq!(import_path("orders"), "models.orders");
        assert_eq!(import_path("modelsx"), "models.modelsx");
    }

    #[test]
    fn test_model_ref_display() {
        assert_eq!(ModelRef::new("orders", "Order").to_string(), "orders.Order");
    }

    #[test]
    fn test_raw_specification_blank() {
        assert!(RawSpecification::empty().is_blank());
        assert!(RawSpecification::new(" \t\n").is_blank());
        assert!(!RawSpecification::new("openapi: 3.0.0").is_blank());
    }

    #[test]
    fn test_raw_specification_summary_json_and_yaml() {
        let json = RawSpecification::new(
            r#"{"openapi": "3.0.0", "info": {"title": "Quotes", "version": "1.2.0"}}"#,
        );
        let summary = json.summary().unwrap();
        assert_eq!(summary.title, "Quotes");
        assert_eq!(summary.version, "1.2.0");
        assert_eq!(summary.format, SpecFormat::Json);

        let yaml = RawSpecification::new("openapi: 3.0.0\ninfo:\n  title: Pets\n  version: '2'\n");
        let summary = yaml.summary().unwrap();
        assert_eq!(summary.title, "Pets");
        assert_eq!(summary.format, SpecFormat::Yaml);
    }

    #[test]
    fn test_raw_specification_summary_absent() {
        assert!(RawSpecification::new("<html></html>").summary().is_none());
        assert!(RawSpecification::empty().summary().is_none());
    }

    #[test]
    fn test_generated_module_file_name() {
        let module = GeneratedModule {
            name: "orders".to_string(),
            code: String::new(),
            classes: vec![],
        };
        assert_eq!(module.file_name(), "orders.py");
    }
}
