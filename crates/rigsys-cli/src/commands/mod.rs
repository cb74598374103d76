//! Subcommand implementations.

pub mod build;
pub mod save_guides;
pub mod validate;

use colored::Colorize;
use rigsys_core::BuildWarning;

/// Prints recovered build conditions in the shared console format.
pub(crate) fn print_warnings(warnings: &[BuildWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        let module = warning
            .module
            .as_ref()
            .map(|m| format!(" ({})", m))
            .unwrap_or_default();
        println!(
            "  {} [{}]: {}{}",
            "!".yellow(),
            warning.code.yellow(),
            warning.message,
            module.dimmed()
        );
    }
}
