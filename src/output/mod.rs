//! Terminal output formatting for gg.
//!
//! - [`messages`] - Error, warning, success and info messages
//! - [`reporter`] - The [`Reporter`] seam used by the storage layer
//! - [`table`] - Aligned key/value tables for `config` and `info`
//! - [`pr`] - Pull request URL output

pub mod messages;
pub mod pr;
pub mod reporter;
pub mod table;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

pub use messages::{print_error, print_info, print_success, print_warning};
pub use pr::{print_open_url_hint, print_pr_url};
pub use reporter::{Reporter, TerminalReporter};
pub use table::{format_table, print_table};
