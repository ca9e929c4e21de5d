//! `hclgen functions`: list registered template functions.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::registry::FunctionRegistry;

/// List template functions and their parameters.
#[derive(Args, Debug, Default)]
pub struct FunctionsCommand {
    /// Print names only, one per line
    #[arg(long)]
    pub names_only: bool,
}

impl FunctionsCommand {
    /// Print the function table to stdout.
    ///
    /// # Errors
    ///
    /// Never fails; returns `Result` for uniformity with other commands.
    pub fn execute(self) -> Result<()> {
        let registry = FunctionRegistry::default();
        for entry in registry.entries() {
            if self.names_only {
                println!("{}", entry.name);
            } else {
                println!("{}({})", entry.name.bold(), entry.signature);
                println!("    {}", entry.summary);
            }
        }
        Ok(())
    }
}
