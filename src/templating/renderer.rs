//! Template rendering engine with Tera.
//!
//! [`TemplateRenderer`] wraps Tera with every [`FunctionRegistry`] entry
//! registered as a Tera function. Tera passes keyword arguments; they are
//! bound to positions by each function's signature, so
//! `{{ get(m=project, key="labels.env", default="dev") }}` calls
//! `get(project, "labels.env", "dev")`.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tera::{Context as TeraContext, Tera};

use super::error::TemplateError;
use crate::funcs::Mapping;
use crate::registry::FunctionRegistry;

/// Name given to templates rendered from inline text.
pub const INLINE_TEMPLATE_NAME: &str = "__inline__";

/// Template renderer with the hclgen function library.
///
/// The renderer holds only the shared registry. Each render builds a fresh
/// Tera instance, so one renderer can serve concurrent renders of the same
/// configuration tree.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    registry: Arc<FunctionRegistry>,
}

impl TemplateRenderer {
    /// Create a renderer over `registry`.
    #[must_use]
    pub const fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self {
            registry,
        }
    }

    /// The registry backing this renderer.
    #[must_use]
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Render inline template text against `data`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] on syntax errors, undefined variables
    /// and failing function calls.
    pub fn render_str(&self, template: &str, data: &Mapping) -> Result<String, TemplateError> {
        self.render_named(INLINE_TEMPLATE_NAME, template, data)
    }

    /// Read and render the template at `path` against `data`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] when the file cannot be read, and the
    /// errors of [`TemplateRenderer::render_str`] otherwise.
    pub fn render_file(&self, path: &Path, data: &Mapping) -> Result<String, TemplateError> {
        let template = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.render_named(&path.display().to_string(), &template, data)
    }

    fn render_named(
        &self,
        name: &str,
        template: &str,
        data: &Mapping,
    ) -> Result<String, TemplateError> {
        tracing::debug!("Rendering template '{}' ({} bytes)", name, template.len());

        let context = TeraContext::from_value(Value::Object(data.clone())).map_err(|source| {
            TemplateError::Context {
                source,
            }
        })?;

        let mut tera = self.build_tera();
        let render_err = |source| TemplateError::Render {
            name: name.to_string(),
            source,
        };
        tera.add_raw_template(name, template).map_err(render_err)?;
        let rendered = tera.render(name, &context).map_err(render_err)?;

        tracing::debug!("Template '{}' rendered ({} bytes)", name, rendered.len());
        Ok(rendered)
    }

    /// Fresh Tera instance with autoescaping off and all functions registered.
    fn build_tera(&self) -> Tera {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        for entry in self.registry.entries() {
            let registry = Arc::clone(&self.registry);
            let name = entry.name;
            tera.register_function(
                name,
                move |args: &HashMap<String, Value>| -> tera::Result<Value> {
                    registry
                        .call_named(name, args)
                        .map_err(|err| tera::Error::chain(format!("call to '{name}' failed"), err))
                },
            );
        }

        tera
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(Arc::new(FunctionRegistry::default()))
    }
}
