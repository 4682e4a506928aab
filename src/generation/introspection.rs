//! Static discovery of model classes in generated Python code.
//!
//! Generated modules come from untrusted specifications, so they are only
//! parsed into a syntax tree and never imported or executed.

use rustpython_parser::{Parse, ast};

use crate::core::{Error, Result};

/// Names of the top-level `class` statements in `code`, in source order.
///
/// Classes nested in other classes, functions, or `if`/`try` blocks are not
/// reported.
pub fn discover_classes(code: &str, module: &str) -> Result<Vec<String>> {
    let suite = ast::Suite::parse(code, &format!("{module}.py")).map_err(|e| {
        Error::Introspection {
            module: module.to_string(),
            message: e.to_string(),
        }
    })?;

    Ok(suite
        .iter()
        .filter_map(|stmt| match stmt {
            ast::Stmt::ClassDef(class) => Some(class.name.as_str().to_string()),
            _ => None,
        })
        .collect())
}
