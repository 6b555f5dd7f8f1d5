//! Getback command handler.

use super::{require_clean_tree, BranchContext};
use crate::error::Result;
use crate::git::{DeleteResult, Git};
use crate::output::{print_success, print_warning};
use crate::progress::GitSpinner;
use crate::prompt;
use crate::storage::ConfigStore;

/// Go back to the default branch, update it, and delete the branch we left.
///
/// An unmerged branch is only force-deleted after confirmation, or right
/// away with `force`.
pub fn getback_command(store: &ConfigStore, git: &Git, force: bool) -> Result<()> {
    let ctx = BranchContext::resolve(store, git)?;
    ctx.require_feature_branch("Nothing to get back from.")?;
    require_clean_tree(git)?;

    git.checkout(&ctx.default)?;

    if git.remote_url(&ctx.upstream)?.is_some() {
        let spinner = GitSpinner::start(&format!("Pulling {}/{}", ctx.upstream, ctx.default));
        match git.pull(&ctx.upstream, &ctx.default) {
            Ok(()) => spinner.finish_success(&format!(
                "Pulled latest {}/{}",
                ctx.upstream, ctx.default
            )),
            Err(e) => {
                spinner.finish_error(&format!("Pull of {}/{} failed", ctx.upstream, ctx.default));
                return Err(e);
            }
        }
    } else {
        print_warning(&format!(
            "No remote called '{}', not pulling {}",
            ctx.upstream, ctx.default
        ));
    }

    match git.delete_local_branch(&ctx.current, false)? {
        DeleteResult::Deleted => {
            print_success(&format!("Deleted branch '{}'", ctx.current));
        }
        DeleteResult::NotFullyMerged => {
            if !force {
                print_warning(&format!(
                    "Doesn't look fully merged into {} yet.",
                    ctx.default
                ));
            }
            let sure = force
                || prompt::confirm(
                    &format!("Are you sure you want to delete '{}'?", ctx.current),
                    true,
                )?;
            if sure {
                git.delete_local_branch(&ctx.current, true)?;
                print_success(&format!("Deleted branch '{}'", ctx.current));
            } else {
                print_warning(&format!("Did not delete branch '{}'", ctx.current));
            }
        }
    }
    Ok(())
}
