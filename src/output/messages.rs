//! Basic message output functions.
//!
//! Errors and warnings go to stderr so they survive `gg ... | less`.

use super::colors::*;

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{RED}{BOLD}Error:{RESET} {RED}{}{RESET}", msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{YELLOW}{}{RESET}", msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{GREEN}{}{RESET}", msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{CYAN}Info:{RESET} {}", msg);
}

/// Print the before/after of a changed setting.
pub fn print_value_change(old: Option<&str>, new: &str) {
    match old {
        Some(old) => println!("Old value: {YELLOW}{}{RESET}", old),
        None => println!("Old value: {ITALIC}nothing set{RESET}"),
    }
    if new.is_empty() {
        println!("New value: {ITALIC}empty{RESET}");
    } else {
        println!("New value: {GREEN}{}{RESET}", new);
    }
}
