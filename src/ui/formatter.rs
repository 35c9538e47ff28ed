//! Console output for a stamping run.
//!
//! Everything goes to stdout so warnings, errors and the summary appear in
//! build logs in the order they were produced. Prefixes are colored only
//! when stdout is a terminal.

use console::style;

use crate::warning::Warning;

/// `WARNING: <message>`
pub fn format_warning(warning: &Warning) -> String {
    format!("{} {}", style("WARNING:").yellow().bold(), warning)
}

/// `ERROR: <message>`
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Print a warning line
pub fn display_warning(warning: &Warning) {
    println!("{}", format_warning(warning));
}

/// Print an error line
pub fn display_error(message: &str) {
    println!("{}", format_error(message));
}

/// Print the build summary block
pub fn display_summary(summary: &str) {
    println!("{}", summary);
}

/// Print the recent version listing
pub fn display_history(history: &str) {
    println!("{}", style(history).dim());
}
