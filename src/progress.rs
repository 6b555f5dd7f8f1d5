use crate::output::{GREEN, RED, RESET};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Spinner shown while a network-bound git command (push, fetch, pull) runs.
///
/// Cleared on drop, so an early `?` return never leaves a dangling line.
pub struct GitSpinner {
    spinner: ProgressBar,
}

impl GitSpinner {
    pub fn new(message: &str) -> Self {
        Self::with_target(message, ProgressDrawTarget::stderr())
    }

    /// Spinner that never draws. Used when stderr isn't a terminal and in tests.
    pub fn hidden(message: &str) -> Self {
        Self::with_target(message, ProgressDrawTarget::hidden())
    }

    /// Drawn spinner on a terminal, hidden one otherwise.
    pub fn start(message: &str) -> Self {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            Self::new(message)
        } else {
            Self::hidden(message)
        }
    }

    fn with_target(message: &str, target: ProgressDrawTarget) -> Self {
        let spinner = ProgressBar::with_draw_target(None, target);
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars(SPINNER_CHARS)
                .template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    pub fn finish_success(&self, message: &str) {
        self.spinner.finish_and_clear();
        println!("{GREEN}{}{RESET}", message);
    }

    pub fn finish_error(&self, error: &str) {
        self.spinner.finish_and_clear();
        eprintln!("{RED}{}{RESET}", error);
    }

    pub fn finish_silently(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for GitSpinner {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

/// Run `work` behind a spinner, clearing it whatever the outcome.
pub fn with_spinner<T, E>(message: &str, work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let spinner = GitSpinner::start(message);
    let result = work();
    spinner.finish_silently();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_keeps_message() {
        let spinner = GitSpinner::hidden("Pushing to origin");
        assert_eq!(spinner.spinner.message(), "Pushing to origin");
        spinner.finish_silently();
        assert!(spinner.spinner.is_finished());
    }

    #[test]
    fn test_spinner_finish_success_and_error() {
        let spinner = GitSpinner::hidden("Fetching");
        spinner.finish_success("Fetched");
        assert!(spinner.spinner.is_finished());

        let spinner = GitSpinner::hidden("Pulling");
        spinner.finish_error("Pull failed");
        assert!(spinner.spinner.is_finished());
    }

    #[test]
    fn test_with_spinner_passes_result_through() {
        let ok: Result<u32, String> = with_spinner("work", || Ok(7));
        assert_eq!(ok, Ok(7));

        let err: Result<u32, String> = with_spinner("work", || Err("nope".to_string()));
        assert_eq!(err, Err("nope".to_string()));
    }

    #[test]
    fn test_drop_clears_unfinished_spinner() {
        let spinner = GitSpinner::hidden("Dropping");
        drop(spinner);
    }
}
