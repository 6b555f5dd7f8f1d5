use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GgError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Storage file {path:?} is malformed: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Storage file {path:?} kept changing underneath us; gave up after {attempts} attempts")]
    WriteConflict { path: PathBuf, attempts: u32 },

    #[error("Unrecognized config key: '{0}'")]
    UnrecognizedConfigKey(String),

    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidConfigValue { key: String, expected: String },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// The user closed stdin or declined to continue.
    #[error("Cancelled")]
    Cancelled,

    #[error("{0}")]
    Command(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not replace storage file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, GgError>;
