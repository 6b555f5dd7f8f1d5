//! Aligned key/value tables.

use super::colors::*;

const MIN_KEY_WIDTH: usize = 30;

/// Format rows as `key:   value` lines with the keys padded to a common width.
///
/// Rows with a `None` value render as a dimmed `n/a`.
pub fn format_table(rows: &[(String, Option<String>)]) -> String {
    let longest = rows.iter().map(|(k, _)| k.len() + 1).max().unwrap_or(0);
    let width = longest.max(MIN_KEY_WIDTH) + 1;

    let mut out = String::new();
    for (key, value) in rows {
        let label = format!("{}:", key);
        let value = match value {
            Some(v) => v.clone(),
            None => format!("{DIM}n/a{RESET}"),
        };
        out.push_str(&format!("{BOLD}{:<width$}{RESET} {}\n", label, value, width = width));
    }
    out
}

/// Print a table with a `KEY VALUE` header.
pub fn print_table(rows: &[(String, Option<String>)]) {
    let longest = rows.iter().map(|(k, _)| k.len() + 1).max().unwrap_or(0);
    let width = longest.max(MIN_KEY_WIDTH) + 1;
    println!("{BOLD}{:<width$}{RESET} {ITALIC}VALUE{RESET}", "KEY", width = width);
    print!("{}", format_table(rows));
}
