//! Terminal output.
//!
//! Diagnostics go to stderr so that stdout carries nothing but the version
//! string a build pipeline captures.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::coordinator::ComputedVersion;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

/// Describes which branch a version was allocated on.
pub fn format_active_branch(result: &ComputedVersion) -> String {
    match result.active_branch_name() {
        Some(branch) if branch == result.tracking_branch => {
            format!("Active branch: {}", branch)
        }
        Some(branch) => format!(
            "Active branch: {} (nearest to {})",
            branch, result.tracking_branch
        ),
        None => format!("No active branch for {}", result.tracking_branch),
    }
}

pub fn display_active_branch(result: &ComputedVersion) {
    display_status(&format_active_branch(result));
}

/// Prints the version, and nothing else, to stdout.
pub fn display_version(version: &str) {
    println!("{}", version);
}
