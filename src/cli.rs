//! Command-line definition.

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gg")]
#[command(
    version,
    about = "CLI to make it easier to manage git branches and GitHub pull requests",
    after_help = "EXAMPLES:
    gg start \"Fix login redirect\"   # New branch from a title
    gg commit                         # Commit, push and print the PR URL
    gg getback                        # Back to the default branch, delete this one
    gg configure branch-prefix me/    # Remember a setting for this repository"
)]
pub struct Cli {
    /// Print full error details and debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new branch from a title
    Start {
        /// Branch title (prompted for if omitted)
        title: Vec<String>,
    },

    /// Commit all tracked changes, then optionally push
    Commit(CommitArgs),

    /// Push the current branch to the upstream remote
    Push,

    /// Go back to the default branch and delete the current one
    #[command(name = "getback")]
    GetBack {
        /// Force-delete the branch even if git thinks it isn't merged
        #[arg(short, long)]
        force: bool,
    },

    /// Merge the latest base branch from upstream into the current branch
    #[command(name = "mainmerge", alias = "mastermerge")]
    MainMerge {
        /// Push afterwards without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// List (and optionally check out or clean up) local branches
    #[command(alias = "branches")]
    Branch(BranchArgs),

    /// Show information about the current branch
    Info,

    /// Show the stored configuration
    Config {
        /// Show the global configuration instead of this repository's
        #[arg(long)]
        global: bool,
    },

    /// Change a repository setting
    Configure {
        /// Setting to change (menu if omitted)
        key: Option<String>,

        /// New value (prompted for if omitted)
        value: Option<String>,
    },

    /// GitHub related settings
    Github {
        #[command(subcommand)]
        command: GithubCommand,
    },

    /// Print a shell completion script
    ShellCompletion {
        /// Shell to generate for (defaults to $SHELL)
        shell: Option<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct CommitArgs {
    /// Commit message (the stored branch title is offered if omitted)
    pub message: Vec<String>,

    /// Skip git hooks
    #[arg(long)]
    pub no_verify: bool,

    /// Answer yes to every question
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct BranchArgs {
    /// Only show branches whose name contains this text (case insensitive)
    pub search: Option<String>,

    /// Maximum number of branches to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub number: usize,

    /// Oldest first
    #[arg(long)]
    pub reverse: bool,

    /// Only show merged branches and offer to delete them
    #[arg(long)]
    pub cleanup: bool,
}

#[derive(Subcommand, Debug)]
pub enum GithubCommand {
    /// Store (or show) the GitHub personal access token
    Token {
        /// Token value (prompted for if omitted)
        token: Option<String>,

        /// Print the stored token (masked)
        #[arg(long)]
        show: bool,
    },
}
