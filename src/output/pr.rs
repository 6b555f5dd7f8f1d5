//! Pull request URL output.

use super::colors::*;

/// Print a pull request (or "open a pull request") URL prominently.
pub fn print_pr_url(url: &str) {
    println!("{GREEN}{BOLD}{}{RESET}", url);
}

/// Reminder printed under URLs.
pub fn print_open_url_hint() {
    println!("{GRAY}(⌘-click to open URLs){RESET}");
}
