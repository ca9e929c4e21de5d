//! Template rendering errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to render a template.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read template {}", .path.display())]
    Read {
        /// Path of the template file
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data could not be turned into a template context.
    #[error("invalid template context")]
    Context {
        #[source]
        source: tera::Error,
    },

    /// Tera rejected the template or a function call aborted rendering.
    #[error("failed to render template '{name}'")]
    Render {
        /// Template name (the file path, or a placeholder for inline text)
        name: String,
        #[source]
        source: tera::Error,
    },
}

impl TemplateError {
    /// The causes of a render failure as one line each, outermost first.
    ///
    /// Tera nests the useful message (the failing function and its arguments)
    /// a few levels down, so callers printing a single line should use this.
    #[must_use]
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(err) = current {
            causes.push(err.to_string());
            current = err.source();
        }
        causes
    }
}
