//! GitHub repository identity and pull request URLs.
//!
//! No network access: everything here is derived from the remote URL.

use std::fmt;

/// `owner/name` of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nwo {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for Nwo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse the owner/name from a GitHub remote URL.
///
/// Understands `https://github.com/o/r(.git)`, `ssh://git@github.com/o/r.git`
/// and the scp-like `git@github.com:o/r.git`. Anything not on github.com
/// yields `None`.
pub fn parse_nwo(url: &str) -> Option<Nwo> {
    let url = url.trim();
    let path = if let Some(rest) = url.strip_prefix("git@github.com:") {
        rest
    } else {
        let without_scheme = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .or_else(|| url.strip_prefix("ssh://"))
            .or_else(|| url.strip_prefix("git://"))?;
        let without_user = without_scheme
            .split_once('@')
            .map(|(_, host_and_path)| host_and_path)
            .unwrap_or(without_scheme);
        let (host, path) = without_user.split_once('/')?;
        let host = host.split(':').next().unwrap_or(host);
        if !host.eq_ignore_ascii_case("github.com") {
            return None;
        }
        path
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut parts = path.split('/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let name = parts.next().filter(|s| !s.is_empty())?;
    if parts.next().is_some() {
        return None;
    }
    Some(Nwo {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

/// URL that opens the "create pull request" page for `branch`.
///
/// Compares against `base` when the branch was started from something
/// other than the default branch.
pub fn new_pull_request_url(
    nwo: &Nwo,
    branch: &str,
    base: Option<&str>,
    default_branch: &str,
) -> String {
    match base.filter(|b| !b.is_empty() && *b != default_branch) {
        Some(base) => format!(
            "https://github.com/{}/compare/{}...{}?expand=1",
            nwo, base, branch
        ),
        None => format!("https://github.com/{}/pull/new/{}", nwo, branch),
    }
}

/// Web URL of `branch` on GitHub.
pub fn branch_url(nwo: &Nwo, branch: &str) -> String {
    format!("https://github.com/{}/tree/{}", nwo, branch)
}
