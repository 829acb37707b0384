//! Template engine setup
//!
//! The form page is compiled into the binary so the server has no
//! runtime template directory to locate.

use tera::Tera;

/// Name of the prediction form template
pub const INDEX_TEMPLATE: &str = "index.html";

/// Build the template engine with all embedded templates registered
///
/// # Errors
///
/// Returns an error if a template fails to parse.
pub fn build_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_templates_parse() {
        let tera = build_templates().unwrap();
        assert!(tera.get_template_names().any(|n| n == INDEX_TEMPLATE));
    }

    #[test]
    fn index_renders_with_classes() {
        let tera = build_templates().unwrap();
        let mut context = tera::Context::new();
        context.insert("classes", &["Clear", "Fog"]);
        context.insert("version", "0.0.0");
        let html = tera.render(INDEX_TEMPLATE, &context).unwrap();
        assert!(html.contains("Fog"));
        assert!(html.contains("Predict"));
    }
}
