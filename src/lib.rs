//! gg: git branch and GitHub pull request helpers.
//!
//! The heart of the crate is [`storage::ConfigStore`], a small persistent
//! store for per-repository settings and per-branch metadata. The
//! [`commands`] use it together with the [`git::Git`] wrapper.

pub mod cli;
pub mod commands;
pub mod completion;
pub mod error;
pub mod git;
pub mod github;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod slug;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use error::{GgError, Result};
pub use git::{Git, RepositoryResolver};
pub use output::{Reporter, TerminalReporter};
pub use storage::{
    ConfigKey, ConfigStore, ConfigValue, GlobalKey, MergeMethod, RepositoryRecord,
    RepositorySettings, StorageDocument,
};
