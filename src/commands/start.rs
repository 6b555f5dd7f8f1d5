//! Start command handler.

use crate::error::{GgError, Result};
use crate::git::Git;
use crate::output::print_success;
use crate::prompt;
use crate::slug::branch_name_for;
use crate::storage::ConfigStore;

/// Create and check out a branch named after `title_words`.
///
/// The title is prompted for when no words are given, defaulting to the
/// repository's `title-prefix`. The title and the branch we started from
/// are remembered for `commit` and for building the PR URL.
pub fn start_command(store: &ConfigStore, git: &Git, title_words: &[String]) -> Result<()> {
    let settings = store.repository_settings()?;

    let title = if title_words.is_empty() {
        prompt::input("Title:", settings.title_prefix.as_deref())?
    } else {
        title_words.join(" ")
    };
    let title = title.trim();
    if title.is_empty() {
        return Err(GgError::Command(
            "A title is required to start a branch".to_string(),
        ));
    }

    let prefix = settings.branch_prefix.as_deref();
    let branch = branch_name_for(title, prefix);
    if branch.is_empty() || Some(branch.as_str()) == prefix {
        return Err(GgError::Command(format!(
            "'{}' doesn't make a usable branch name",
            title
        )));
    }

    let base = git.current_branch()?;
    git.create_and_checkout(&branch)?;
    print_success(&format!("Created new branch: {}", branch));

    store.set_branch_title(&branch, title)?;
    // Detached HEAD has no meaningful base.
    if base != "HEAD" {
        store.set_base_branch(&branch, &base)?;
    }
    Ok(())
}
