//! Info command handler.

use super::{plural, BranchContext};
use crate::error::Result;
use crate::git::Git;
use crate::github;
use crate::output::{print_table, print_warning, BOLD, DIM, RESET, YELLOW};
use crate::storage::ConfigStore;

/// Print what gg knows about the current branch.
pub fn info_command(store: &ConfigStore, git: &Git) -> Result<()> {
    let ctx = BranchContext::resolve(store, git)?;
    if ctx.on_default_branch() {
        print_warning(&format!(
            "You are on the default branch ({}) already.",
            ctx.default
        ));
        return Ok(());
    }

    let mut rows: Vec<(String, Option<String>)> = Vec::new();
    let mut warnings = Vec::new();

    if !git.is_clean()? {
        let files = git.modified_files()?.len() + git.untracked_files()?.len();
        rows.push((
            "Status".to_string(),
            Some(format!(
                "{BOLD}{YELLOW}Uncommitted changes ({}){RESET}",
                plural(files, "file")
            )),
        ));
        warnings.push("Local branch has uncommitted changes.".to_string());
    }

    rows.push(("Current Branch".to_string(), Some(bold(&ctx.current))));
    rows.push(("Default Branch".to_string(), Some(bold(&ctx.default))));

    let base = store.base_branch(&ctx.current)?;
    rows.push((
        "Base Branch".to_string(),
        Some(match base {
            Some(b) => bold(&b),
            None => format!("{DIM}(not set){RESET}"),
        }),
    ));
    rows.push((
        "Title".to_string(),
        store.branch_title(&ctx.current)?.map(|t| bold(&t)),
    ));
    rows.push(("Upstream".to_string(), Some(bold(&ctx.upstream))));

    let nwo = git
        .remote_url(&ctx.upstream)?
        .and_then(|url| github::parse_nwo(&url));
    rows.push(("GitHub Repo".to_string(), nwo.as_ref().map(|n| bold(&n.to_string()))));

    if git.remote_branch_exists(&ctx.upstream, &ctx.current)? {
        if let Some(nwo) = &nwo {
            rows.push((
                "GitHub Branch".to_string(),
                Some(bold(&github::branch_url(nwo, &ctx.current))),
            ));
        }

        let (ahead, behind) = git.ahead_behind(&ctx.upstream, &ctx.current)?;
        let remote_ref = format!("{}/{}", ctx.upstream, ctx.current);
        rows.push((
            "Commits Ahead".to_string(),
            Some(highlight_nonzero(
                ahead,
                format!("{} ahead {}", plural(ahead as usize, "commit"), remote_ref),
            )),
        ));
        rows.push((
            "Commits Behind".to_string(),
            Some(highlight_nonzero(
                behind,
                format!("{} behind {}", plural(behind as usize, "commit"), remote_ref),
            )),
        ));

        if behind > 0 {
            warnings.push("You might want to pull the latest changes from the remote branch.".to_string());
        } else if ahead > 0 {
            warnings.push("You might want to push your commits to the remote branch.".to_string());
        }
    } else {
        rows.push(("GitHub Branch".to_string(), None));
    }

    println!("Branch Information:\n");
    print_table(&rows);
    println!();
    for warning in warnings {
        print_warning(&warning);
    }
    Ok(())
}

fn bold(s: &str) -> String {
    format!("{BOLD}{}{RESET}", s)
}

fn highlight_nonzero(count: u32, text: String) -> String {
    if count > 0 {
        format!("{YELLOW}{}{RESET}", text)
    } else {
        text
    }
}
