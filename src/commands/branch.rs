//! Branch command handler.

use super::BranchContext;
use crate::cli::BranchArgs;
use crate::error::Result;
use crate::git::{BranchEntry, DeleteResult, Git};
use crate::output::{print_success, print_warning, BOLD, CYAN, DIM, GREEN, RESET};
use crate::prompt;
use crate::storage::ConfigStore;

#[derive(Debug, Clone, PartialEq, Eq)]
struct BranchRow {
    entry: BranchEntry,
    is_default: bool,
    merged: bool,
}

impl BranchRow {
    fn marker(&self) -> String {
        if self.entry.is_current {
            format!("{GREEN}{BOLD}   (Your current branch){RESET}")
        } else if self.is_default {
            format!("{CYAN}   (default branch){RESET}")
        } else if self.merged {
            format!("{CYAN}   (merged already){RESET}")
        } else {
            String::new()
        }
    }
}

/// Filter and annotate branches for display.
///
/// In cleanup mode only merged branches other than the current and default
/// one are kept.
fn select_branches(
    entries: Vec<BranchEntry>,
    merged: &[String],
    default_branch: &str,
    args: &BranchArgs,
) -> Vec<BranchRow> {
    let needle = args.search.as_deref().map(str::to_lowercase);
    entries
        .into_iter()
        .filter(|e| match &needle {
            Some(n) => e.name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .map(|entry| BranchRow {
            is_default: entry.name == default_branch,
            merged: merged.contains(&entry.name),
            entry,
        })
        .filter(|row| !args.cleanup || (row.merged && !row.is_default && !row.entry.is_current))
        .take(args.number)
        .collect()
}

/// List local branches, newest first, optionally filtered by `search`.
///
/// A single non-current match is offered for checkout. With `--cleanup`
/// each listed (merged) branch is offered for deletion.
pub fn branch_command(store: &ConfigStore, git: &Git, args: &BranchArgs) -> Result<()> {
    let ctx = BranchContext::resolve(store, git)?;
    let entries = git.list_branches(args.reverse)?;
    let merged = git.merged_branches()?;
    let rows = select_branches(entries, &merged, &ctx.default, args);

    if rows.is_empty() {
        print_warning("Found nothing");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{DIM}{:<24}{RESET} {}{}",
            row.entry.relative_date,
            row.entry.name,
            row.marker()
        );
        if args.cleanup && prompt::confirm("Delete this branch locally?", false)? {
            match git.delete_local_branch(&row.entry.name, false)? {
                DeleteResult::Deleted => {
                    print_success(&format!("Deleted branch {BOLD}{}{RESET}", row.entry.name))
                }
                DeleteResult::NotFullyMerged => print_warning(&format!(
                    "'{}' is not fully merged, left alone",
                    row.entry.name
                )),
            }
        }
    }

    if let [only] = rows.as_slice() {
        if !args.cleanup && !only.entry.is_current {
            println!();
            if prompt::confirm(&format!("Check out {}?", only.entry.name), true)? {
                git.checkout(&only.entry.name)?;
                print_success(&format!("Switched to branch '{}'", only.entry.name));
            }
        }
    }
    Ok(())
}
