//! `hclgen render`: render one template against merged data files.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::{RenderConfig, load_merged_data};
use crate::templating::TemplateRenderer;

/// Render a template against merged data files.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template file to render
    pub template: PathBuf,

    /// Data file to merge into the context (repeatable; later files win).
    /// Replaces the `data` list from the configuration file.
    #[arg(short, long = "data", value_name = "FILE")]
    pub data: Vec<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderCommand {
    /// Run the render.
    ///
    /// # Errors
    ///
    /// Returns an error if a data file fails to load, rendering fails, or the
    /// output cannot be written.
    pub fn execute(self, config: &RenderConfig) -> Result<()> {
        let data_files = if self.data.is_empty() { &config.data } else { &self.data };
        let output = self.output.as_ref().or(config.output.as_ref());

        let data = load_merged_data(data_files.as_slice()).context("Failed to load data files")?;
        tracing::info!(
            "Rendering {} with {} data file(s)",
            self.template.display(),
            data_files.len()
        );

        let renderer = TemplateRenderer::default();
        let rendered = renderer
            .render_file(&self.template, &data)
            .with_context(|| format!("Failed to render {}", self.template.display()))?;

        match output {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory {}", parent.display())
                    })?;
                }
                std::fs::write(path, &rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!("Wrote {}", path.display());
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }
}
