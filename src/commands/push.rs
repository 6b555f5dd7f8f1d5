//! Push command handler.

use super::{plural, print_pull_request_url, push_to_remote, require_remote, BranchContext};
use crate::error::{GgError, Result};
use crate::git::Git;
use crate::output::print_warning;
use crate::storage::ConfigStore;

/// Push the current branch to the upstream remote and print the PR URL.
///
/// Refuses with uncommitted changes to tracked files. Untracked files are
/// only warned about.
pub fn push_command(store: &ConfigStore, git: &Git) -> Result<()> {
    let ctx = BranchContext::resolve(store, git)?;
    ctx.require_feature_branch("Nothing to push from here.")?;

    if !git.is_clean()? {
        if !git.modified_files()?.is_empty() {
            return Err(GgError::Command(
                "Current branch is not in a clean state. Run `git status`".to_string(),
            ));
        }
        let untracked = git.untracked_files()?;
        if !untracked.is_empty() {
            print_warning(&format!(
                "There are {}. Going to ignore that.",
                plural(untracked.len(), "untracked file")
            ));
        }
    }

    let remote_url = require_remote(git, &ctx.upstream)?;
    push_to_remote(git, &ctx.upstream, &ctx.current)?;
    print_pull_request_url(store, &remote_url, &ctx)?;
    Ok(())
}
