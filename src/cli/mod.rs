//! Command-line interface for hclgen.
//!
//! # Commands
//!
//! - `render` - render a template against merged data files
//! - `functions` - list the template functions and their parameters
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config` / `-c` - configuration file (default `./hclgen.toml` if present)
//!
//! # Examples
//!
//! ```bash
//! hclgen render bucket.tf.tmpl --data defaults.yaml --data prod.yaml
//! hclgen -c deploy/hclgen.toml render bucket.tf.tmpl --output bucket.tf
//! hclgen functions
//! ```

mod functions;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::RenderConfig;

pub use functions::FunctionsCommand;
pub use render::RenderCommand;

/// Top-level command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "hclgen",
    about = "Render HCL resource definitions from templates and merged data files",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (equivalent to `RUST_LOG=debug`)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = "HCLGEN_CONFIG")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a template against merged data files
    Render(RenderCommand),
    /// List template functions and their parameters
    Functions(FunctionsCommand),
}

/// Logging settings derived from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Explicit log filter; `None` defers to `RUST_LOG` and the config file.
    pub log_level: Option<String>,
    /// Configuration file path from `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Initialise the global tracing subscriber, writing to stderr.
    ///
    /// Precedence: `--verbose`/`--quiet`, then `RUST_LOG`, then the
    /// configuration file's `log_level`, then `warn`.
    ///
    /// Returns `false` when a global subscriber was already installed, in
    /// which case that subscriber stays in place.
    pub fn init_logging(&self, fallback: Option<&str>) -> bool {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or("warn"))),
        };

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .is_ok();

        if !installed {
            tracing::debug!("Global tracing subscriber already set, keeping the existing one");
        }
        installed
    }
}

impl Cli {
    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Load configuration, set up logging and run the subcommand.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error, with context.
    pub fn execute(self) -> Result<()> {
        let cli_config = self.build_config();
        let file_config = RenderConfig::load_optional(cli_config.config_path.as_deref());

        // Logging must be up before config errors are reported.
        let fallback = file_config.as_ref().ok().and_then(|c| c.log_level.clone());
        cli_config.init_logging(fallback.as_deref());
        let file_config = file_config?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&file_config),
            Commands::Functions(cmd) => cmd.execute(),
        }
    }
}
