use crate::error::{GgError, Result};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Fallback when the remote's HEAD is unknown.
pub const FALLBACK_DEFAULT_BRANCH: &str = "main";

/// Resolves the identity of the repository the process is operating in.
pub trait RepositoryResolver {
    /// Absolute path of the top-level directory of the current working tree.
    fn repository_root(&self) -> Result<PathBuf>;
}

/// Thin wrapper around the `git` binary.
///
/// Commands run in `workdir` when set, otherwise in the process's current
/// directory.
#[derive(Debug, Clone, Default)]
pub struct Git {
    workdir: Option<PathBuf>,
}

impl Git {
    pub fn new() -> Self {
        Self { workdir: None }
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(?args, "running git");
        Ok(self.command().args(args).output()?)
    }

    /// Run git and return trimmed stdout, failing with stderr on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(GgError::Git(format!(
                "`git {}` failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run git with the terminal attached so hooks keep their colors.
    fn run_interactive(&self, args: &[&str]) -> Result<bool> {
        tracing::debug!(?args, "running git (interactive)");
        let status = self
            .command()
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.success())
    }

    /// Get the current branch name.
    ///
    /// Works on an unborn branch (fresh `git init`). A detached HEAD
    /// yields `"HEAD"`.
    pub fn current_branch(&self) -> Result<String> {
        let output = self.output(&["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        if output.status.success() {
            let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !branch.is_empty() {
                return Ok(branch);
            }
        }
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Default branch of `remote`, as advertised by `<remote>/HEAD`.
    pub fn default_branch(&self, remote: &str) -> Result<String> {
        let listing = self.run(&["branch", "-r"])?;
        Ok(parse_default_branch(&listing, remote)
            .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string()))
    }

    /// Check if a local branch exists
    pub fn branch_exists(&self, branch: &str) -> Result<bool> {
        let local = self.output(&[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/heads/{}", branch),
        ])?;
        Ok(local.status.success())
    }

    /// Check if `<remote>/<branch>` is known locally
    pub fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        let out = self.output(&[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/remotes/{}/{}", remote, branch),
        ])?;
        Ok(out.status.success())
    }

    /// Checkout an existing branch
    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map_err(|e| {
            GgError::Git(format!("Failed to checkout branch '{}': {}", branch, e))
        })?;
        Ok(())
    }

    /// Create and checkout a new branch
    pub fn create_and_checkout(&self, branch: &str) -> Result<()> {
        if self.branch_exists(branch)? {
            return Err(GgError::Git(format!("Branch '{}' already exists", branch)));
        }
        self.run(&["checkout", "-b", branch]).map_err(|e| {
            GgError::Git(format!("Failed to create branch '{}': {}", branch, e))
        })?;
        Ok(())
    }

    /// Check if working directory is clean (no uncommitted changes)
    pub fn is_clean(&self) -> Result<bool> {
        Ok(self.run(&["status", "--porcelain"])?.is_empty())
    }

    /// Files git does not track and does not ignore.
    pub fn untracked_files(&self) -> Result<Vec<String>> {
        let out = self.run(&["ls-files", "--others", "--exclude-standard"])?;
        Ok(non_empty_lines(&out))
    }

    /// Tracked files with changes in the working tree or the index.
    pub fn modified_files(&self) -> Result<Vec<String>> {
        let mut files = non_empty_lines(&self.run(&["diff", "--name-only"])?);
        for staged in non_empty_lines(&self.run(&["diff", "--name-only", "--cached"])?) {
            if !files.contains(&staged) {
                files.push(staged);
            }
        }
        Ok(files)
    }

    pub fn add(&self, files: &[String]) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend(files.iter().map(String::as_str));
        self.run(&args)?;
        Ok(())
    }

    /// Stage every modification to already-tracked files.
    pub fn add_tracked(&self) -> Result<()> {
        self.run(&["add", "--update"])?;
        Ok(())
    }

    /// Commit staged changes. Returns `false` if git (or a hook) refused.
    pub fn commit(&self, message: &str, no_verify: bool) -> Result<bool> {
        let mut args = vec!["commit", "-m", message];
        if no_verify {
            args.push("--no-verify");
        }
        self.run_interactive(&args)
    }

    /// Fetch URL of a remote, `None` if no such remote exists.
    pub fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let output = self.output(&["remote", "get-url", remote])?;
        if !output.status.success() {
            return Ok(None);
        }
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!url.is_empty()).then_some(url))
    }

    /// Push `branch` to `remote` with upstream tracking.
    pub fn push_branch(&self, remote: &str, branch: &str) -> Result<PushResult> {
        let output = self.output(&["push", "--set-upstream", remote, branch])?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            if stderr.contains("Everything up-to-date") {
                return Ok(PushResult::AlreadyUpToDate);
            }
            return Ok(PushResult::Success);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let error_msg = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        Ok(PushResult::Error(error_msg))
    }

    pub fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["fetch", remote, branch])?;
        Ok(())
    }

    pub fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["pull", remote, branch])?;
        Ok(())
    }

    /// Merge `<remote>/<branch>` into the current branch.
    pub fn merge_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let refname = format!("{}/{}", remote, branch);
        self.run(&["merge", "--no-edit", &refname])?;
        Ok(())
    }

    /// Delete a local branch, refusing unmerged branches unless `force`.
    pub fn delete_local_branch(&self, branch: &str, force: bool) -> Result<DeleteResult> {
        let flag = if force { "-D" } else { "-d" };
        let output = self.output(&["branch", flag, branch])?;
        if output.status.success() {
            return Ok(DeleteResult::Deleted);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("not fully merged") {
            return Ok(DeleteResult::NotFullyMerged);
        }
        Err(GgError::Git(format!(
            "Failed to delete branch '{}': {}",
            branch,
            stderr.trim()
        )))
    }

    /// Local branches sorted by committer date, newest first unless `oldest_first`.
    pub fn list_branches(&self, oldest_first: bool) -> Result<Vec<BranchEntry>> {
        let sort = if oldest_first {
            "--sort=committerdate"
        } else {
            "--sort=-committerdate"
        };
        let out = self.run(&[
            "for-each-ref",
            sort,
            "--format=%(HEAD)|%(refname:short)|%(committerdate:relative)",
            "refs/heads",
        ])?;
        Ok(out.lines().filter_map(parse_branch_line).collect())
    }

    /// Local branches already merged into HEAD.
    pub fn merged_branches(&self) -> Result<Vec<String>> {
        let out = self.run(&["branch", "--merged", "--format=%(refname:short)"])?;
        Ok(non_empty_lines(&out))
    }

    /// Commits `(ahead, behind)` of `branch` relative to `<remote>/<branch>`.
    pub fn ahead_behind(&self, remote: &str, branch: &str) -> Result<(u32, u32)> {
        let range = format!("{}...{}/{}", branch, remote, branch);
        let out = self.run(&["rev-list", "--left-right", "--count", &range])?;
        let mut parts = out.split_whitespace().map(|n| n.parse::<u32>().unwrap_or(0));
        Ok((parts.next().unwrap_or(0), parts.next().unwrap_or(0)))
    }
}

impl RepositoryResolver for Git {
    fn repository_root(&self) -> Result<PathBuf> {
        let output = self.output(&["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(GgError::NotARepository(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if toplevel.is_empty() {
            return Err(GgError::NotARepository(
                "git did not report a top-level directory".to_string(),
            ));
        }
        Ok(PathBuf::from(toplevel))
    }
}

/// Result type for push operations
#[derive(Debug, Clone, PartialEq)]
pub enum PushResult {
    /// Push succeeded
    Success,
    /// Branch already up-to-date on remote
    AlreadyUpToDate,
    /// Push failed with error message
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    Deleted,
    /// `git branch -d` refused; `-D` would be needed.
    NotFullyMerged,
}

/// One line of `gg branch` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    pub name: String,
    /// Relative committer date as git renders it, e.g. "3 days ago".
    pub relative_date: String,
    pub is_current: bool,
}

/// Find `<remote>/HEAD -> <remote>/<branch>` in `git branch -r` output.
pub fn parse_default_branch(listing: &str, remote: &str) -> Option<String> {
    let marker = format!("{remote}/HEAD -> {remote}/");
    listing.lines().find_map(|line| {
        line.trim()
            .strip_prefix(&marker)
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
    })
}

fn parse_branch_line(line: &str) -> Option<BranchEntry> {
    let mut parts = line.splitn(3, '|');
    let head = parts.next()?;
    let name = parts.next()?.trim();
    let relative_date = parts.next().unwrap_or("").trim();
    if name.is_empty() {
        return None;
    }
    Some(BranchEntry {
        name: name.to_string(),
        relative_date: relative_date.to_string(),
        is_current: head.trim() == "*",
    })
}

fn non_empty_lines(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_empty_git_repo, init_git_repo};
    use tempfile::TempDir;

    #[test]
    fn test_parse_default_branch_origin() {
        let listing = "  origin/HEAD -> origin/develop\n  origin/develop\n  origin/feature\n";
        assert_eq!(
            parse_default_branch(listing, "origin"),
            Some("develop".to_string())
        );
    }

    #[test]
    fn test_parse_default_branch_other_remote() {
        let listing = "  origin/HEAD -> origin/main\n  upstream/HEAD -> upstream/trunk\n";
        assert_eq!(
            parse_default_branch(listing, "upstream"),
            Some("trunk".to_string())
        );
    }

    #[test]
    fn test_parse_default_branch_missing() {
        assert_eq!(parse_default_branch("  origin/main\n", "origin"), None);
        assert_eq!(parse_default_branch("", "origin"), None);
    }

    #[test]
    fn test_parse_branch_line() {
        let entry = parse_branch_line("*|feature/x|2 days ago").unwrap();
        assert_eq!(entry.name, "feature/x");
        assert_eq!(entry.relative_date, "2 days ago");
        assert!(entry.is_current);

        let entry = parse_branch_line(" |main|3 weeks ago").unwrap();
        assert!(!entry.is_current);
        assert!(parse_branch_line(" ||").is_none());
    }

    #[test]
    fn test_repository_root_outside_repo_is_not_a_repository() {
        let dir = TempDir::new().unwrap();
        let err = Git::at(dir.path()).repository_root().unwrap_err();
        assert!(matches!(err, GgError::NotARepository(_)));
    }

    #[test]
    fn test_repository_root_inside_repo() {
        let dir = TempDir::new().unwrap();
        init_git_repo(dir.path());
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let root = Git::at(&nested).repository_root().unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_create_checkout_and_list_branches() {
        let dir = TempDir::new().unwrap();
        init_git_repo(dir.path());
        let git = Git::at(dir.path());

        git.create_and_checkout("feature/x").unwrap();
        assert_eq!(git.current_branch().unwrap(), "feature/x");
        assert!(git.create_and_checkout("feature/x").is_err());

        let branches = git.list_branches(false).unwrap();
        let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
        assert!(names.contains(&"main"));
        assert!(names.contains(&"feature/x"));
        assert!(branches.iter().any(|b| b.name == "feature/x" && b.is_current));
    }

    #[test]
    fn test_current_branch_on_unborn_head() {
        let dir = TempDir::new().unwrap();
        init_empty_git_repo(dir.path());
        let git = Git::at(dir.path());
        assert_eq!(git.current_branch().unwrap(), "main");

        git.create_and_checkout("first-branch").unwrap();
        assert_eq!(git.current_branch().unwrap(), "first-branch");
    }

    #[test]
    fn test_current_branch_detached_head() {
        let dir = TempDir::new().unwrap();
        init_git_repo(dir.path());
        let git = Git::at(dir.path());
        git.checkout("main~0").unwrap();
        assert_eq!(git.current_branch().unwrap(), "HEAD");
    }

    #[test]
    fn test_untracked_and_modified_files() {
        let dir = TempDir::new().unwrap();
        init_git_repo(dir.path());
        let git = Git::at(dir.path());
        assert!(git.is_clean().unwrap());

        std::fs::write(dir.path().join("new.txt"), "x").unwrap();
        std::fs::write(dir.path().join("README.md"), "changed").unwrap();

        assert_eq!(git.untracked_files().unwrap(), vec!["new.txt".to_string()]);
        assert_eq!(git.modified_files().unwrap(), vec!["README.md".to_string()]);
        assert!(!git.is_clean().unwrap());
    }

    #[test]
    fn test_delete_unmerged_branch_requires_force() {
        let dir = TempDir::new().unwrap();
        init_git_repo(dir.path());
        let git = Git::at(dir.path());

        git.create_and_checkout("topic").unwrap();
        std::fs::write(dir.path().join("topic.txt"), "x").unwrap();
        git.add(&["topic.txt".to_string()]).unwrap();
        assert!(git.commit("topic work", true).unwrap());
        git.checkout("main").unwrap();

        assert_eq!(
            git.delete_local_branch("topic", false).unwrap(),
            DeleteResult::NotFullyMerged
        );
        assert_eq!(
            git.delete_local_branch("topic", true).unwrap(),
            DeleteResult::Deleted
        );
        assert!(!git.branch_exists("topic").unwrap());
    }

    #[test]
    fn test_remote_url_missing_remote() {
        let dir = TempDir::new().unwrap();
        init_git_repo(dir.path());
        assert_eq!(Git::at(dir.path()).remote_url("origin").unwrap(), None);
    }

    #[test]
    fn test_push_result_variants_are_distinct() {
        assert_ne!(PushResult::Success, PushResult::AlreadyUpToDate);
        assert_ne!(PushResult::Success, PushResult::Error("e".to_string()));
    }
}
