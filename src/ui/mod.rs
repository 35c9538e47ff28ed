//! User interface module - console output for the stamping run.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_history, display_summary, display_warning, format_error,
    format_warning,
};
