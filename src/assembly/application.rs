//! Templating the Streamlit form application

use once_cell::sync::OnceCell;
use serde::Serialize;
use tera::{Context, Tera};

use crate::assembly::ModelSelection;
use crate::core::Result;

static TEMPLATES: OnceCell<Tera> = OnceCell::new();

const HEADER: &str = "header.py";
const SINGLE_FORM: &str = "single_form.py";
const MULTI_FORM: &str = "multi_form.py";
const TRAILER: &str = "trailer.py";

fn templates() -> Result<&'static Tera> {
    TEMPLATES.get_or_try_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                HEADER,
                include_str!("../../templates/streamlit/header.py.tera"),
            ),
            (
                SINGLE_FORM,
                include_str!("../../templates/streamlit/single_form.py.tera"),
            ),
            (
                MULTI_FORM,
                include_str!("../../templates/streamlit/multi_form.py.tera"),
            ),
            (
                TRAILER,
                include_str!("../../templates/streamlit/trailer.py.tera"),
            ),
        ])?;
        Ok(tera)
    })
}

#[derive(Serialize)]
struct ImportLine<'a> {
    import_path: String,
    class_name: &'a str,
}

/// Source of the application rendering `selection` as a form.
///
/// One model gets a fixed form; several get a sidebar radio that picks the
/// form model at runtime. Both end with [`trailer`].
pub fn assemble_application(selection: &ModelSelection) -> Result<String> {
    let tera = templates()?;

    let imports: Vec<ImportLine> = selection
        .models()
        .iter()
        .map(|model| ImportLine {
            import_path: model.import_path(),
            class_name: &model.class_name,
        })
        .collect();
    let mut context = Context::new();
    context.insert("imports", &imports);
    let mut code = tera.render(HEADER, &context)?;

    let mut context = Context::new();
    let body = match selection.models() {
        [single] => {
            context.insert("model", &single.class_name);
            tera.render(SINGLE_FORM, &context)?
        }
        _ => {
            context.insert("models", &selection.class_names());
            tera.render(MULTI_FORM, &context)?
        }
    };
    code.push_str(&body);
    code.push_str(&trailer()?);
    code.push('\n');

    tracing::debug!(models = selection.len(), bytes = code.len(), "Assembled application");
    Ok(code)
}

/// Closing block shared by every assembled application
pub fn trailer() -> Result<String> {
    Ok(templates()?.render(TRAILER, &Context::new())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ModelRef;

    fn selection(models: &[(&str, &str)]) -> ModelSelection {
        ModelSelection::new(models.iter().map(|(m, c)| ModelRef::new(*m, *c))).unwrap()
    }

    const EXPECTED_TRAILER: &str = "if not input_data:
    st.warning(\"Submit the Form to continue\")
    st.stop()

st.code(repr(input_data))
st.json(input_data.json())
";

    #[test]
    fn test_trailer_text() {
        assert_eq!(trailer().unwrap(), EXPECTED_TRAILER);
    }

    #[test]
    fn test_single_model_application() {
        let code = assemble_application(&selection(&[("models", "Quote")])).unwrap();

        let expected = format!(
            "import streamlit as st
import streamlit_pydantic as sp

from models import Quote

input_data = sp.pydantic_form(key=\"pydantic_form\", model=Quote)

{EXPECTED_TRAILER}
"
        );
        assert_eq!(code, expected);
    }

    #[test]
    fn test_multi_model_application() {
        let code = assemble_application(&selection(&[
            ("orders", "Order"),
            ("users", "User"),
        ]))
        .unwrap();

        let expected = format!(
            "import streamlit as st
import streamlit_pydantic as sp

from models.orders import Order
from models.users import User

models = [Order, User]
model = st.sidebar.radio(
    label=\"Which Model to Use in Form\",
    options=models,
    format_func=lambda x: x.__name__,
)
input_data = sp.pydantic_form(key=\"pydantic_form\", model=model)

{EXPECTED_TRAILER}
"
        );
        assert_eq!(code, expected);
    }

    #[test]
    fn test_both_shapes_share_trailer() {
        let trailer = format!("{}\n", trailer().unwrap());
        let single = assemble_application(&selection(&[("models", "Quote")])).unwrap();
        let multi =
            assemble_application(&selection(&[("models", "Quote"), ("models", "Address")]))
                .unwrap();

        assert!(single.ends_with(&trailer));
        assert!(multi.ends_with(&trailer));
        assert!(single.contains("model=Quote)"));
        assert!(!single.contains("st.sidebar.radio"));
        assert!(multi.contains("st.sidebar.radio"));
        assert!(multi.contains("models = [Quote, Address]"));
    }

    #[test]
    fn test_only_selected_classes_are_imported() {
        let code = assemble_application(&selection(&[("models", "Address")])).unwrap();
        assert!(code.contains("from models import Address\n"));
        assert!(!code.contains("Quote"));
    }
}
