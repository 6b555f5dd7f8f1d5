//! Interactive stdin prompts.
//!
//! Every prompt has a `*_with` variant taking explicit reader and writer so
//! the answer handling can be exercised without a terminal. End of input is
//! reported as [`GgError::Cancelled`].

use std::io::{self, BufRead, Write};

use crate::error::{GgError, Result};
use crate::output::{BOLD, CYAN, GRAY, GREEN, RESET, YELLOW};

/// Ask a yes/no question and return the user's choice
pub fn confirm(question: &str, default: bool) -> Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stdout(), question, default)
}

pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    write!(writer, "{CYAN}?{RESET} {} {GRAY}{}{RESET} ", question, hint)?;
    writer.flush()?;

    let answer = read_answer(reader)?;
    Ok(parse_confirm(&answer).unwrap_or(default))
}

/// Ask for free text. An empty answer yields `default` (or an empty string).
pub fn input(question: &str, default: Option<&str>) -> Result<String> {
    input_with(&mut io::stdin().lock(), &mut io::stdout(), question, default)
}

pub fn input_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    default: Option<&str>,
) -> Result<String> {
    match default.filter(|d| !d.is_empty()) {
        Some(d) => write!(writer, "{CYAN}?{RESET} {} {GRAY}({}){RESET} ", question, d)?,
        None => write!(writer, "{CYAN}?{RESET} {} ", question)?,
    }
    writer.flush()?;

    let answer = read_answer(reader)?;
    if answer.is_empty() {
        return Ok(default.unwrap_or_default().to_string());
    }
    Ok(answer)
}

/// Ask user to select from a list of options
/// Returns the index of the selected option (0-based)
pub fn select(question: &str, options: &[&str], default: usize) -> Result<usize> {
    select_with(
        &mut io::stdin().lock(),
        &mut io::stdout(),
        question,
        options,
        default,
    )
}

pub fn select_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    options: &[&str],
    default: usize,
) -> Result<usize> {
    if options.is_empty() {
        return Err(GgError::Prompt("nothing to choose from".to_string()));
    }
    let default = default.min(options.len() - 1);

    writeln!(writer, "{CYAN}?{RESET} {}", question)?;
    writeln!(writer)?;
    for (i, option) in options.iter().enumerate() {
        let marker = if i == default {
            format!("{GREEN}>{RESET}")
        } else {
            " ".to_string()
        };
        writeln!(writer, "  {} {BOLD}{}{RESET}. {}", marker, i + 1, option)?;
    }

    loop {
        writeln!(writer)?;
        write!(writer, "{GRAY}Enter choice [{}]:{RESET} ", default + 1)?;
        writer.flush()?;

        let answer = read_answer(reader)?;
        match parse_choice(&answer, options.len(), default) {
            Some(index) => return Ok(index),
            None => writeln!(
                writer,
                "{YELLOW}Please enter a number between 1 and {}{RESET}",
                options.len()
            )?,
        }
    }
}

/// Ask the user to pick any number of options.
/// Returns the 0-based indices in the order they were typed. An empty
/// answer picks nothing.
pub fn multi_select_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    options: &[&str],
) -> Result<Vec<usize>> {
    if options.is_empty() {
        return Ok(Vec::new());
    }

    writeln!(writer, "{CYAN}?{RESET} {}", question)?;
    writeln!(writer)?;
    for (i, option) in options.iter().enumerate() {
        writeln!(writer, "    {BOLD}{}{RESET}. {}", i + 1, option)?;
    }

    loop {
        writeln!(writer)?;
        write!(writer, "{GRAY}Enter numbers separated by spaces (empty for none):{RESET} ")?;
        writer.flush()?;

        let answer = read_answer(reader)?;
        match parse_multi_choice(&answer, options.len()) {
            Some(picked) => return Ok(picked),
            None => writeln!(
                writer,
                "{YELLOW}Please enter numbers between 1 and {}{RESET}",
                options.len()
            )?,
        }
    }
}

/// Read one trimmed line; EOF means the user bailed out.
fn read_answer<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| GgError::Prompt(e.to_string()))?;
    if read == 0 {
        return Err(GgError::Cancelled);
    }
    Ok(line.trim().to_string())
}

/// `Some(choice)` for a recognizable yes/no, `None` to fall back to the default.
pub fn parse_confirm(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// 1-based menu answer to a 0-based index. Empty input picks `default`.
pub fn parse_choice(answer: &str, count: usize, default: usize) -> Option<usize> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Some(n - 1),
        _ => None,
    }
}

/// Space or comma separated 1-based numbers to deduplicated 0-based indices.
pub fn parse_multi_choice(answer: &str, count: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for part in answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
    {
        let n: usize = part.parse().ok()?;
        if n < 1 || n > count {
            return None;
        }
        if !picked.contains(&(n - 1)) {
            picked.push(n - 1);
        }
    }
    Some(picked)
}
