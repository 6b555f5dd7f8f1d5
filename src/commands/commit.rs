//! Commit command handler.

use super::{print_pull_request_url, push_to_remote, BranchContext};
use crate::cli::CommitArgs;
use crate::error::{GgError, Result};
use crate::git::Git;
use crate::output::{print_success, print_warning, ITALIC, RESET};
use crate::prompt;
use crate::storage::ConfigStore;
use std::io::{self, BufRead, Write};

/// Commit every change to tracked files, then offer to push.
///
/// Untracked files are listed and added on request. The commit message
/// defaults to the branch title recorded by `gg start`.
pub fn commit_command(store: &ConfigStore, git: &Git, args: &CommitArgs) -> Result<()> {
    let ctx = BranchContext::resolve(store, git)?;
    ctx.require_feature_branch("Switch to a feature branch before committing.")?;

    let untracked = git.untracked_files()?;
    if !untracked.is_empty() {
        print_warning("Untracked files:");
        for file in &untracked {
            println!("  {}", file);
        }
        println!();
        let to_add = if args.yes {
            untracked
        } else {
            choose_untracked(&mut io::stdin().lock(), &mut io::stdout(), &untracked)?
        };
        if !to_add.is_empty() {
            git.add(&to_add)?;
        }
    }

    let title = commit_title(store, &ctx.current, &args.message)?;

    git.add_tracked()?;
    if git.modified_files()?.is_empty() {
        print_warning("Nothing to commit.");
    } else {
        commit_with_retry(git, &title, args.no_verify)?;
    }

    let remote_url = git.remote_url(&ctx.upstream)?;
    let push = match &remote_url {
        Some(_) => args.yes || prompt::confirm(&format!("Push to {}:", ctx.upstream), true)?,
        None => {
            print_warning(&format!("No remote called '{}'.", ctx.upstream));
            false
        }
    };

    let Some(remote_url) = remote_url.filter(|_| push) else {
        print_success("Changes committed but not pushed.");
        return Ok(());
    };
    push_to_remote(git, &ctx.upstream, &ctx.current)?;

    if !store.repository_settings()?.disable_pr_creation {
        print_pull_request_url(store, &remote_url, &ctx)?;
    }
    Ok(())
}

/// Ask which untracked files to add: all (`y`), none (`n`) or pick them
/// one by one (`i`).
fn choose_untracked<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    untracked: &[String],
) -> Result<Vec<String>> {
    let answer = prompt::input_with(
        reader,
        writer,
        "Do you want to add these untracked files? [Y/n/i]",
        None,
    )?;
    match answer.to_lowercase().as_str() {
        "" | "y" | "yes" => Ok(untracked.to_vec()),
        "n" | "no" => Ok(Vec::new()),
        "i" => {
            let options: Vec<&str> = untracked.iter().map(String::as_str).collect();
            let picked = prompt::multi_select_with(
                reader,
                writer,
                "Select which untracked files to add",
                &options,
            )?;
            Ok(picked.into_iter().map(|i| untracked[i].clone()).collect())
        }
        other => Err(GgError::Command(format!(
            "Invalid answer '{}'. Please enter 'y', 'n' or 'i'.",
            other
        ))),
    }
}

/// Message words from the command line, else prompt with the stored title.
///
/// A title typed at the prompt is remembered when the branch had none.
fn commit_title(store: &ConfigStore, branch: &str, message: &[String]) -> Result<String> {
    if !message.is_empty() {
        return Ok(message.join(" "));
    }

    let stored = store.branch_title(branch)?;
    let title = prompt::input("Title:", stored.as_deref())?;
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(GgError::Command(
            "No title provided. Please provide a title for the commit.".to_string(),
        ));
    }
    if stored.is_none() {
        store.set_branch_title(branch, &title)?;
    }
    Ok(title)
}

/// Commit, offering a `--no-verify` retry when a hook rejects it.
fn commit_with_retry(git: &Git, title: &str, no_verify: bool) -> Result<()> {
    if git.commit(title, no_verify)? {
        return Ok(());
    }

    if !no_verify {
        println!();
        print_warning("Commit failed and you did not use --no-verify.");
        if prompt::confirm("Try again but with --no-verify?", false)? {
            print_warning(&format!("Retrying commit {ITALIC}with{RESET} --no-verify..."));
            if git.commit(title, true)? {
                print_success("Commit succeeded with --no-verify");
                return Ok(());
            }
        }
    }

    Err(GgError::Command(
        "The git commit failed. Hopefully the output above explains why.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_git_repo, FixedRepository, RecordingReporter};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_choose_untracked_all_or_none() {
        let untracked = files(&["a.txt", "b.txt"]);
        let mut out = Vec::new();
        assert_eq!(
            choose_untracked(&mut Cursor::new("y\n"), &mut out, &untracked).unwrap(),
            untracked
        );
        assert_eq!(
            choose_untracked(&mut Cursor::new("\n"), &mut out, &untracked).unwrap(),
            untracked
        );
        assert!(choose_untracked(&mut Cursor::new("N\n"), &mut out, &untracked)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_choose_untracked_individually() {
        let untracked = files(&["a.txt", "b.txt", "c.txt"]);
        let mut out = Vec::new();
        let picked =
            choose_untracked(&mut Cursor::new("i\n3 1\n"), &mut out, &untracked).unwrap();
        assert_eq!(picked, files(&["c.txt", "a.txt"]));

        let picked = choose_untracked(&mut Cursor::new("i\n\n"), &mut out, &untracked).unwrap();
        assert!(picked.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("b.txt"));
    }

    #[test]
    fn test_choose_untracked_rejects_other_answers() {
        let mut out = Vec::new();
        let err = choose_untracked(&mut Cursor::new("maybe\n"), &mut out, &files(&["a.txt"]))
            .unwrap_err();
        assert!(matches!(err, GgError::Command(_)));
        assert!(err.to_string().contains("'i'"));
    }

    #[test]
    fn test_commit_without_remote_commits_tracked_and_untracked() {
        let repo_dir = TempDir::new().unwrap();
        init_git_repo(repo_dir.path());
        let git = Git::at(repo_dir.path());
        git.create_and_checkout("feature").unwrap();
        std::fs::write(repo_dir.path().join("README.md"), "changed").unwrap();
        std::fs::write(repo_dir.path().join("new.txt"), "new").unwrap();

        let db_dir = TempDir::new().unwrap();
        let resolver = FixedRepository::new(repo_dir.path());
        let reporter = RecordingReporter::default();
        let store = ConfigStore::new(db_dir.path().join("db.json"), &resolver, &reporter);

        let args = CommitArgs {
            message: vec!["Update".to_string(), "readme".to_string()],
            no_verify: true,
            yes: true,
        };
        commit_command(&store, &git, &args).unwrap();

        assert!(git.is_clean().unwrap());
    }

    #[test]
    fn test_commit_refused_on_default_branch() {
        let repo_dir = TempDir::new().unwrap();
        init_git_repo(repo_dir.path());
        let git = Git::at(repo_dir.path());

        let db_dir = TempDir::new().unwrap();
        let resolver = FixedRepository::new(repo_dir.path());
        let reporter = RecordingReporter::default();
        let store = ConfigStore::new(db_dir.path().join("db.json"), &resolver, &reporter);

        let err = commit_command(&store, &git, &CommitArgs::default()).unwrap_err();
        assert!(err.to_string().contains("default branch (main)"));
    }
}
