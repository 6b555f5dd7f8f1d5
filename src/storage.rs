//! Persistent per-repository configuration and branch metadata.
//!
//! Everything gg remembers between invocations lives in a single JSON
//! document (by default `~/.gg/db.json`):
//!
//! ```json
//! {
//!   "REPOS": {
//!     "/home/me/src/project": {
//!       "BRANCH_TITLES": { "fix-login": "Fix login redirect" },
//!       "CONFIG": { "branch-prefix": "me/", "offer-auto-merge": true }
//!     }
//!   },
//!   "GLOBAL_CONFIG": { "github-token": "..." }
//! }
//! ```
//!
//! Repositories are keyed by the absolute path of their working tree root.
//! Two clones of the same remote are unrelated records.
//!
//! # Consistency
//!
//! Reads never write. Every mutation is a full read-modify-write of the
//! document: the file is read and fingerprinted (SHA-256 of its bytes), the
//! mutation is applied, the file is fingerprinted again, and only if nothing
//! changed in between is the new document written to a temp file in the same
//! directory and renamed over the original. The re-check and the rename run
//! under an exclusive advisory lock on a sidecar `db.json.lock`, so two
//! writers can never both pass the check. If another `gg` process got
//! there first the mutation is replayed on the fresh document, up to
//! [`MAX_WRITE_ATTEMPTS`] times, after which [`GgError::WriteConflict`] is
//! returned. A reader never observes a half-written file.

use crate::error::{GgError, Result};
use crate::git::RepositoryResolver;
use crate::output::Reporter;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;

/// Environment variable overriding the storage file location.
pub const STORAGE_PATH_ENV: &str = "GG_DB_FILE";

const STORAGE_DIR_NAME: &str = ".gg";
const STORAGE_FILE_NAME: &str = "db.json";

/// Version of the document layout written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// How many times a mutation is replayed after a concurrent modification.
pub const MAX_WRITE_ATTEMPTS: u32 = 5;

/// Remote name used when a repository has no `upstream-name` configured.
pub const DEFAULT_UPSTREAM_NAME: &str = "origin";

// ============================================================================
// Values and keys
// ============================================================================

/// A scalar configuration value, stored as a JSON string or boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            ConfigValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::String(_) => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

/// Shape a configuration key's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    MergeMethod,
}

impl ValueKind {
    fn describe(self) -> String {
        match self {
            ValueKind::String => "a string".to_string(),
            ValueKind::Bool => "true or false".to_string(),
            ValueKind::MergeMethod => format!(
                "one of {}",
                MergeMethod::ALL
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    fn accepts(self, value: &ConfigValue) -> bool {
        match (self, value) {
            (ValueKind::String, ConfigValue::String(_)) => true,
            (ValueKind::Bool, ConfigValue::Bool(_)) => true,
            (ValueKind::MergeMethod, ConfigValue::String(s)) => s.parse::<MergeMethod>().is_ok(),
            _ => false,
        }
    }
}

/// Merge strategy used when enabling auto-merge on a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    Merge,
    Squash,
    Rebase,
}

impl MergeMethod {
    pub const ALL: [MergeMethod; 3] = [MergeMethod::Merge, MergeMethod::Squash, MergeMethod::Rebase];

    pub fn as_str(self) -> &'static str {
        match self {
            MergeMethod::Merge => "MERGE",
            MergeMethod::Squash => "SQUASH",
            MergeMethod::Rebase => "REBASE",
        }
    }
}

impl FromStr for MergeMethod {
    type Err = GgError;

    fn from_str(s: &str) -> Result<Self> {
        MergeMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| GgError::InvalidConfigValue {
                key: ConfigKey::AutoMergeMethod.as_str().to_string(),
                expected: ValueKind::MergeMethod.describe(),
            })
    }
}

/// The closed set of per-repository configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Prepended to generated branch names.
    BranchPrefix,
    /// Default text offered when prompting for a title.
    TitlePrefix,
    /// Remote treated as upstream for push/pull/PR purposes.
    UpstreamName,
    OfferAutoMerge,
    AutoMergeMethod,
    DisablePrCreation,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        ConfigKey::BranchPrefix,
        ConfigKey::TitlePrefix,
        ConfigKey::UpstreamName,
        ConfigKey::OfferAutoMerge,
        ConfigKey::AutoMergeMethod,
        ConfigKey::DisablePrCreation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::BranchPrefix => "branch-prefix",
            ConfigKey::TitlePrefix => "title-prefix",
            ConfigKey::UpstreamName => "upstream-name",
            ConfigKey::OfferAutoMerge => "offer-auto-merge",
            ConfigKey::AutoMergeMethod => "auto-merge-method",
            ConfigKey::DisablePrCreation => "disable-pr-creation",
        }
    }

    /// Human label used in the `configure` menu.
    pub fn description(self) -> &'static str {
        match self {
            ConfigKey::BranchPrefix => "Common branch prefix",
            ConfigKey::TitlePrefix => "Common title prefix",
            ConfigKey::UpstreamName => "Upstream name",
            ConfigKey::OfferAutoMerge => "Offer auto-merge on PRs",
            ConfigKey::AutoMergeMethod => "Auto-merge method",
            ConfigKey::DisablePrCreation => "Disable PR creation",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ConfigKey::BranchPrefix | ConfigKey::TitlePrefix | ConfigKey::UpstreamName => {
                ValueKind::String
            }
            ConfigKey::OfferAutoMerge | ConfigKey::DisablePrCreation => ValueKind::Bool,
            ConfigKey::AutoMergeMethod => ValueKind::MergeMethod,
        }
    }

    /// Reject a value whose shape doesn't match this key.
    pub fn validate(self, value: &ConfigValue) -> Result<()> {
        if self.kind().accepts(value) {
            Ok(())
        } else {
            Err(GgError::InvalidConfigValue {
                key: self.as_str().to_string(),
                expected: self.kind().describe(),
            })
        }
    }

    /// Turn command-line text into a value of the right shape.
    pub fn parse_value(self, raw: &str) -> Result<ConfigValue> {
        let value = match self.kind() {
            ValueKind::String => ConfigValue::String(raw.to_string()),
            ValueKind::MergeMethod => ConfigValue::String(raw.to_ascii_uppercase()),
            ValueKind::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => ConfigValue::Bool(true),
                "false" | "no" | "n" | "0" => ConfigValue::Bool(false),
                _ => ConfigValue::String(raw.to_string()),
            },
        };
        self.validate(&value)?;
        Ok(value)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = GgError;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GgError::UnrecognizedConfigKey(s.to_string()))
    }
}

/// The closed set of global (not repository specific) keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKey {
    GithubToken,
}

impl GlobalKey {
    pub const ALL: [GlobalKey; 1] = [GlobalKey::GithubToken];

    pub fn as_str(self) -> &'static str {
        match self {
            GlobalKey::GithubToken => "github-token",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            GlobalKey::GithubToken => ValueKind::String,
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, GlobalKey::GithubToken)
    }

    pub fn validate(self, value: &ConfigValue) -> Result<()> {
        if self.kind().accepts(value) {
            Ok(())
        } else {
            Err(GgError::InvalidConfigValue {
                key: self.as_str().to_string(),
                expected: self.kind().describe(),
            })
        }
    }
}

impl FromStr for GlobalKey {
    type Err = GgError;

    fn from_str(s: &str) -> Result<Self> {
        GlobalKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GgError::UnrecognizedConfigKey(s.to_string()))
    }
}

// ============================================================================
// Document
// ============================================================================

/// Everything stored for one repository.
///
/// Titles and base branches are history, not a cache: they are never removed,
/// not even when the branch is deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    #[serde(rename = "BRANCH_TITLES", default)]
    pub branch_titles: BTreeMap<String, String>,

    #[serde(rename = "CONFIG", default)]
    pub config: BTreeMap<String, ConfigValue>,

    /// Branch the branch was started from, keyed like `branch_titles`.
    #[serde(
        rename = "BASE_BRANCHES",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub base_branches: BTreeMap<String, String>,

    /// Keys this build doesn't know about, kept so rewrites don't drop them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The whole persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageDocument {
    #[serde(rename = "REPOS", default)]
    pub repositories: BTreeMap<String, RepositoryRecord>,

    #[serde(rename = "GLOBAL_CONFIG", default)]
    pub global_config: BTreeMap<String, ConfigValue>,

    /// Absent in files written before versioning; those are version 1.
    #[serde(rename = "SCHEMA_VERSION", default = "legacy_schema_version")]
    pub schema_version: u32,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn legacy_schema_version() -> u32 {
    1
}

impl Default for StorageDocument {
    fn default() -> Self {
        Self {
            repositories: BTreeMap::new(),
            global_config: BTreeMap::new(),
            schema_version: SCHEMA_VERSION,
            extra: BTreeMap::new(),
        }
    }
}

impl StorageDocument {
    /// Parse raw file contents, attributing failures to `path`.
    pub fn parse(bytes: &[u8], path: &Path) -> Result<Self> {
        let document: StorageDocument =
            serde_json::from_slice(bytes).map_err(|e| GgError::MalformedDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if document.schema_version > SCHEMA_VERSION {
            return Err(GgError::MalformedDocument {
                path: path.to_path_buf(),
                reason: format!(
                    "schema version {} is newer than the supported version {}",
                    document.schema_version, SCHEMA_VERSION
                ),
            });
        }

        Ok(document)
    }

    pub fn record(&self, repository: &str) -> Option<&RepositoryRecord> {
        self.repositories.get(repository)
    }

    /// The record for `repository`, created empty if missing.
    pub fn record_mut(&mut self, repository: &str) -> &mut RepositoryRecord {
        self.repositories.entry(repository.to_string()).or_default()
    }

    fn to_pretty_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// A loaded document plus the fingerprint of the bytes it came from.
struct Snapshot {
    document: StorageDocument,
    /// `None` when the file did not exist.
    fingerprint: Option<String>,
}

fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `db.json` -> `db.json.lock`, next to the file it guards.
fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Take the exclusive advisory lock guarding writes to `path`.
///
/// Held only across the fingerprint re-check and the rename, so readers
/// never wait and `mutate` never runs under it. Released when the returned
/// handle is dropped.
fn lock_storage(path: &Path) -> Result<File> {
    fs::create_dir_all(parent_dir(path))?;
    let lock_path = lock_path(path);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)?;
    tracing::trace!(path = %lock_path.display(), "waiting for storage lock");
    file.lock_exclusive()?;
    Ok(file)
}

fn write_atomically(path: &Path, document: &StorageDocument) -> Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(&dir)?;

    let json = document.to_pretty_json()?;
    let mut temp = NamedTempFile::new_in(&dir)?;
    temp.write_all(json.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    Ok(())
}

// ============================================================================
// Typed settings view
// ============================================================================

/// Typed view over a repository's `CONFIG` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySettings {
    pub branch_prefix: Option<String>,
    pub title_prefix: Option<String>,
    pub upstream_name: Option<String>,
    pub offer_auto_merge: Option<bool>,
    pub auto_merge_method: Option<MergeMethod>,
    pub disable_pr_creation: bool,
}

impl RepositorySettings {
    /// Build the typed view, failing on a recognized key with the wrong shape.
    ///
    /// Unrecognized keys are ignored.
    pub fn from_config(config: &BTreeMap<String, ConfigValue>) -> Result<Self> {
        let mut settings = RepositorySettings::default();
        for (raw_key, value) in config {
            let Ok(key) = raw_key.parse::<ConfigKey>() else {
                continue;
            };
            key.validate(value)?;
            match key {
                ConfigKey::BranchPrefix => settings.branch_prefix = value.as_str().map(String::from),
                ConfigKey::TitlePrefix => settings.title_prefix = value.as_str().map(String::from),
                ConfigKey::UpstreamName => settings.upstream_name = value.as_str().map(String::from),
                ConfigKey::OfferAutoMerge => settings.offer_auto_merge = value.as_bool(),
                ConfigKey::AutoMergeMethod => {
                    settings.auto_merge_method = value.as_str().and_then(|s| s.parse().ok())
                }
                ConfigKey::DisablePrCreation => {
                    settings.disable_pr_creation = value.as_bool().unwrap_or(false)
                }
            }
        }
        Ok(settings)
    }
}

// ============================================================================
// Store
// ============================================================================

/// Location of the storage file: `$GG_DB_FILE`, else `~/.gg/db.json`.
pub fn default_storage_path() -> Result<PathBuf> {
    storage_path_from(std::env::var_os(STORAGE_PATH_ENV), dirs::home_dir())
}

fn storage_path_from(env_override: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = home.ok_or_else(|| {
        GgError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;
    Ok(home.join(STORAGE_DIR_NAME).join(STORAGE_FILE_NAME))
}

/// Read/modify/write access to the storage document.
///
/// Constructed once per process and handed to command handlers. Holds no
/// cached state: every call goes back to disk.
pub struct ConfigStore<'a> {
    path: PathBuf,
    resolver: &'a dyn RepositoryResolver,
    reporter: &'a dyn Reporter,
}

impl<'a> ConfigStore<'a> {
    pub fn new(
        path: impl Into<PathBuf>,
        resolver: &'a dyn RepositoryResolver,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            path: path.into(),
            resolver,
            reporter,
        }
    }

    /// Store backed by [`default_storage_path`].
    pub fn open_default(
        resolver: &'a dyn RepositoryResolver,
        reporter: &'a dyn Reporter,
    ) -> Result<Self> {
        Ok(Self::new(default_storage_path()?, resolver, reporter))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identity of the current repository (its root path as a string).
    pub fn repository_id(&self) -> Result<String> {
        let root = self.resolver.repository_root()?;
        Ok(root.to_string_lossy().into_owned())
    }

    /// Read the whole document. A missing file yields the default skeleton.
    pub fn load_document(&self) -> Result<StorageDocument> {
        Ok(self.load()?.document)
    }

    fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> Result<Snapshot> {
        match self.read_bytes()? {
            Some(bytes) => Ok(Snapshot {
                document: StorageDocument::parse(&bytes, &self.path)?,
                fingerprint: Some(fingerprint(&bytes)),
            }),
            None => Ok(Snapshot {
                document: StorageDocument::default(),
                fingerprint: None,
            }),
        }
    }

    fn current_fingerprint(&self) -> Result<Option<String>> {
        Ok(self.read_bytes()?.map(|bytes| fingerprint(&bytes)))
    }

    /// Apply `mutate` to the document and persist it.
    ///
    /// `mutate` may run more than once (once per attempt) and must only
    /// touch the document it is given.
    pub(crate) fn update<T>(
        &self,
        mut mutate: impl FnMut(&mut StorageDocument) -> Result<T>,
    ) -> Result<T> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let Snapshot {
                mut document,
                fingerprint,
            } = self.load()?;

            let outcome = mutate(&mut document)?;
            document.schema_version = SCHEMA_VERSION;

            let target = self.write_target();
            let lock = lock_storage(&target)?;
            if self.current_fingerprint()? != fingerprint {
                drop(lock);
                tracing::debug!(
                    path = %self.path.display(),
                    attempt,
                    "storage file changed during update, retrying"
                );
                continue;
            }

            write_atomically(&target, &document)?;
            drop(lock);
            tracing::debug!(path = %target.display(), attempt, "storage file written");
            return Ok(outcome);
        }

        Err(GgError::WriteConflict {
            path: self.path.clone(),
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }

    /// The file a write replaces: the symlink target when the storage path
    /// is a symlink, so the link itself survives.
    fn write_target(&self) -> PathBuf {
        match fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
            }
            _ => self.path.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Repository config
    // ------------------------------------------------------------------

    /// The current repository's `CONFIG` section (empty if never set).
    pub fn repository_config(&self) -> Result<BTreeMap<String, ConfigValue>> {
        let repository = self.repository_id()?;
        let document = self.load_document()?;
        Ok(document
            .record(&repository)
            .map(|r| r.config.clone())
            .unwrap_or_default())
    }

    /// Typed view of the current repository's config.
    pub fn repository_settings(&self) -> Result<RepositorySettings> {
        RepositorySettings::from_config(&self.repository_config()?)
    }

    /// Set `key` for the current repository, returning the previous value.
    pub fn set_repository_config(
        &self,
        key: ConfigKey,
        value: ConfigValue,
    ) -> Result<Option<ConfigValue>> {
        key.validate(&value)?;
        let repository = self.repository_id()?;
        self.update(|document| {
            Ok(document
                .record_mut(&repository)
                .config
                .insert(key.as_str().to_string(), value.clone()))
        })
    }

    /// Like [`set_repository_config`](Self::set_repository_config) for a key
    /// given as text. Unknown keys are rejected before touching the disk.
    pub fn set_repository_config_str(
        &self,
        key: &str,
        value: ConfigValue,
    ) -> Result<Option<ConfigValue>> {
        let key: ConfigKey = key.parse()?;
        self.set_repository_config(key, value)
    }

    /// Remove `key` from the current repository, returning what was there.
    pub fn unset_repository_config(&self, key: ConfigKey) -> Result<Option<ConfigValue>> {
        let repository = self.repository_id()?;
        self.update(|document| Ok(document.record_mut(&repository).config.remove(key.as_str())))
    }

    /// Name of the upstream remote, falling back to `origin` with a warning.
    pub fn upstream_remote_name(&self) -> Result<String> {
        let config = self.repository_config()?;
        if let Some(value) = config.get(ConfigKey::UpstreamName.as_str()) {
            ConfigKey::UpstreamName.validate(value)?;
            if let Some(name) = value.as_str().filter(|s| !s.is_empty()) {
                return Ok(name.to_string());
            }
        }
        self.reporter.warn(&format!(
            "No upstream name configured for this repository, assuming '{}'. \
             Run `gg configure upstream-name` to change it.",
            DEFAULT_UPSTREAM_NAME
        ));
        Ok(DEFAULT_UPSTREAM_NAME.to_string())
    }

    // ------------------------------------------------------------------
    // Branch metadata
    // ------------------------------------------------------------------

    pub fn branch_title(&self, branch: &str) -> Result<Option<String>> {
        let repository = self.repository_id()?;
        let document = self.load_document()?;
        Ok(document
            .record(&repository)
            .and_then(|r| r.branch_titles.get(branch).cloned()))
    }

    pub fn set_branch_title(&self, branch: &str, title: &str) -> Result<()> {
        let repository = self.repository_id()?;
        self.update(|document| {
            document
                .record_mut(&repository)
                .branch_titles
                .insert(branch.to_string(), title.to_string());
            Ok(())
        })
    }

    /// The branch `branch` was started from, if recorded.
    pub fn base_branch(&self, branch: &str) -> Result<Option<String>> {
        let repository = self.repository_id()?;
        let document = self.load_document()?;
        Ok(document
            .record(&repository)
            .and_then(|r| r.base_branches.get(branch).cloned()))
    }

    pub fn set_base_branch(&self, branch: &str, base: &str) -> Result<()> {
        let repository = self.repository_id()?;
        self.update(|document| {
            document
                .record_mut(&repository)
                .base_branches
                .insert(branch.to_string(), base.to_string());
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Global config
    // ------------------------------------------------------------------

    /// The `GLOBAL_CONFIG` section. Works outside any repository.
    pub fn global_config(&self) -> Result<BTreeMap<String, ConfigValue>> {
        Ok(self.load_document()?.global_config)
    }

    pub fn set_global_config(
        &self,
        key: GlobalKey,
        value: ConfigValue,
    ) -> Result<Option<ConfigValue>> {
        key.validate(&value)?;
        self.update(|document| {
            Ok(document
                .global_config
                .insert(key.as_str().to_string(), value.clone()))
        })
    }

    pub fn set_global_config_str(
        &self,
        key: &str,
        value: ConfigValue,
    ) -> Result<Option<ConfigValue>> {
        let key: GlobalKey = key.parse()?;
        self.set_global_config(key, value)
    }

    /// The stored GitHub token, if any.
    pub fn github_token(&self) -> Result<Option<String>> {
        Ok(self
            .global_config()?
            .get(GlobalKey::GithubToken.as_str())
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from))
    }
}
