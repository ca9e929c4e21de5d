//! hclgen CLI entry point
//!
//! Parses arguments, runs the command, and prints failures with context and
//! suggestions.

use clap::Parser;
use hclgen::cli::Cli;
use hclgen::core::user_friendly_error;

fn main() {
    let cli = Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
