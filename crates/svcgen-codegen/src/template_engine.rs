//! Template engine for wrapper synthesis.
//!
//! Wraps Handlebars with the built-in wrapper templates registered up
//! front. Strict mode is enabled so a context missing a field fails
//! loudly instead of rendering a hole, and HTML escaping is disabled
//! because the output is TypeScript source, not markup.

use handlebars::Handlebars;
use serde::Serialize;
use svcgen_core::{Error, Result};

/// Template engine with the built-in wrapper templates registered.
///
/// Rendering is deterministic: the same context always produces
/// byte-identical output, which is what makes repeated generation runs
/// safe to diff.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new engine and registers the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if template registration fails (should not
    /// happen with the valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Fail on missing context fields
        handlebars.set_strict_mode(true);
        // Output is source code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register(
            &mut handlebars,
            "wrapper/service",
            include_str!("../templates/service.ts.hbs"),
        )?;
        Self::register(
            &mut handlebars,
            "wrapper/index",
            include_str!("../templates/index.ts.hbs"),
        )?;

        Ok(Self { handlebars })
    }

    fn register(handlebars: &mut Handlebars<'a>, name: &str, template: &str) -> Result<()> {
        handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::Template {
                message: format!("failed to register template '{name}': {e}"),
            })
    }

    /// Renders a registered template with the given context.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is unknown, the context
    /// cannot be serialized, or rendering fails.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::Template {
                message: format!("rendering '{template_name}' failed: {e}"),
            })
    }
}
