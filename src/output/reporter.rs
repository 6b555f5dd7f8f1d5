//! Advisory output seam.
//!
//! Library code that wants to tell the user something (without failing)
//! goes through a [`Reporter`] instead of printing directly, so callers
//! and tests can decide where the messages end up.

use super::messages::{print_error, print_success, print_warning};

/// Sink for advisory messages. Never used to gate control flow.
pub trait Reporter {
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Reporter that writes colored messages to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn warn(&self, message: &str) {
        print_warning(message);
    }

    fn error(&self, message: &str) {
        print_error(message);
    }

    fn success(&self, message: &str) {
        print_success(message);
    }
}
