//! CLI command handlers for gg.
//!
//! Each subcommand has its own module. Handlers take the process-wide
//! [`ConfigStore`] and a [`Git`] handle and return [`Result`]; printing the
//! error and choosing the exit code is left to `main`.
//!
//! - [`start`] - Create a branch from a title
//! - [`commit`] - Commit, push and print the pull request URL
//! - [`push`] - Push the current branch
//! - [`getback`] - Return to the default branch and delete the current one
//! - [`mainmerge`] - Merge the upstream base branch into the current branch
//! - [`branch`] - List, check out and clean up local branches
//! - [`info`] - Branch information table
//! - [`config`] - Show stored configuration
//! - [`configure`] - Change a repository setting
//! - [`token`] - Store the GitHub token

mod branch;
mod commit;
mod config;
mod configure;
mod getback;
mod info;
mod mainmerge;
mod push;
mod start;
mod token;

pub use branch::branch_command;
pub use commit::commit_command;
pub use config::config_command;
pub use configure::configure_command;
pub use getback::getback_command;
pub use info::info_command;
pub use mainmerge::mainmerge_command;
pub use push::push_command;
pub use start::start_command;
pub use token::token_command;

use crate::error::{GgError, Result};
use crate::git::{Git, PushResult};
use crate::github;
use crate::output::{print_open_url_hint, print_pr_url};
use crate::progress::GitSpinner;
use crate::storage::ConfigStore;

/// Where the current branch stands relative to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BranchContext {
    pub current: String,
    pub default: String,
    pub upstream: String,
}

impl BranchContext {
    pub fn resolve(store: &ConfigStore, git: &Git) -> Result<Self> {
        let upstream = store.upstream_remote_name()?;
        let current = git.current_branch()?;
        let default = git.default_branch(&upstream)?;
        Ok(Self {
            current,
            default,
            upstream,
        })
    }

    pub fn on_default_branch(&self) -> bool {
        self.current == self.default
    }

    /// Fail when on the default branch, with a command-specific hint.
    pub fn require_feature_branch(&self, hint: &str) -> Result<()> {
        if self.on_default_branch() {
            return Err(GgError::Command(format!(
                "You are on the default branch ({}). {}",
                self.default, hint
            )));
        }
        Ok(())
    }
}

pub(crate) fn require_clean_tree(git: &Git) -> Result<()> {
    if !git.is_clean()? {
        return Err(GgError::Command(
            "Current branch is not in a clean state. Run `git status`".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn require_remote(git: &Git, remote: &str) -> Result<String> {
    git.remote_url(remote)?
        .ok_or_else(|| GgError::Command(format!("Could not find a remote called '{}'", remote)))
}

/// Push `branch` to `remote` behind a spinner, failing on git errors.
pub(crate) fn push_to_remote(git: &Git, remote: &str, branch: &str) -> Result<()> {
    let spinner = GitSpinner::start(&format!("Pushing to {}/{}", remote, branch));
    let result = match git.push_branch(remote, branch) {
        Ok(result) => result,
        Err(e) => {
            spinner.finish_error(&format!("Push to {}/{} failed", remote, branch));
            return Err(e);
        }
    };
    match result {
        PushResult::Success => {
            spinner.finish_success(&format!("Changes pushed to {}/{}", remote, branch));
            Ok(())
        }
        PushResult::AlreadyUpToDate => {
            spinner.finish_success(&format!("{}/{} is already up to date", remote, branch));
            Ok(())
        }
        PushResult::Error(message) => {
            spinner.finish_error(&format!("Push to {}/{} failed", remote, branch));
            Err(GgError::Git(message))
        }
    }
}

/// Print the "open a pull request" URL when the remote is on GitHub.
///
/// Returns whether a URL was printed.
pub(crate) fn print_pull_request_url(
    store: &ConfigStore,
    remote_url: &str,
    ctx: &BranchContext,
) -> Result<bool> {
    let Some(nwo) = github::parse_nwo(remote_url) else {
        tracing::debug!(remote_url, "remote is not on GitHub, no PR URL");
        return Ok(false);
    };
    let base = store.base_branch(&ctx.current)?;
    let url = github::new_pull_request_url(&nwo, &ctx.current, base.as_deref(), &ctx.default);
    println!();
    print_pr_url(&url);
    print_open_url_hint();
    Ok(true)
}

/// `n` plus the noun, pluralized with a trailing `s`.
pub(crate) fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
