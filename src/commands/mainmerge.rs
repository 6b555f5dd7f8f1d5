//! Mainmerge command handler.

use super::{push_to_remote, require_clean_tree, require_remote, BranchContext};
use crate::error::Result;
use crate::git::Git;
use crate::output::print_success;
use crate::progress::with_spinner;
use crate::prompt;
use crate::storage::ConfigStore;

/// Fetch and merge `<upstream>/<base>` into the current branch.
///
/// `base` is the branch this one was started from, or the default branch
/// when that wasn't recorded.
pub fn mainmerge_command(store: &ConfigStore, git: &Git, yes: bool) -> Result<()> {
    let ctx = BranchContext::resolve(store, git)?;
    ctx.require_feature_branch("Nothing to merge into.")?;
    require_clean_tree(git)?;
    require_remote(git, &ctx.upstream)?;

    let base = store
        .base_branch(&ctx.current)?
        .unwrap_or_else(|| ctx.default.clone());

    with_spinner(&format!("Fetching {}/{}", ctx.upstream, base), || {
        git.fetch(&ctx.upstream, &base)
    })?;
    git.merge_remote_branch(&ctx.upstream, &base)?;
    print_success(&format!(
        "Latest {}/{} branch merged into this branch.",
        ctx.upstream, base
    ));

    let push = yes || prompt::confirm(&format!("Push to {}:", ctx.upstream), false)?;
    if push {
        push_to_remote(git, &ctx.upstream, &ctx.current)?;
    }
    Ok(())
}
