//! Drives the store through the public API the way separate `gg`
//! invocations would: a fresh `ConfigStore` per "process".

use gg::{
    ConfigKey, ConfigStore, ConfigValue, GgError, GlobalKey, RepositoryResolver, Reporter, Result,
};
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;

struct StaticRoot(Option<PathBuf>);

impl RepositoryResolver for StaticRoot {
    fn repository_root(&self) -> Result<PathBuf> {
        self.0
            .clone()
            .ok_or_else(|| GgError::NotARepository("not a git repository".to_string()))
    }
}

#[derive(Default)]
struct Collected(RefCell<Vec<String>>);

impl Reporter for Collected {
    fn warn(&self, message: &str) {
        self.0.borrow_mut().push(format!("warn: {}", message));
    }
    fn error(&self, message: &str) {
        self.0.borrow_mut().push(format!("error: {}", message));
    }
    fn success(&self, message: &str) {
        self.0.borrow_mut().push(format!("success: {}", message));
    }
}

#[test]
fn settings_persist_across_store_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let repo = StaticRoot(Some(PathBuf::from("/work/project")));
    let reporter = Collected::default();

    {
        let store = ConfigStore::new(&path, &repo, &reporter);
        store
            .set_repository_config(ConfigKey::UpstreamName, ConfigValue::from("upstream"))
            .unwrap();
        store.set_branch_title("feature/x", "Add X").unwrap();
        store.set_base_branch("feature/x", "develop").unwrap();
    }

    let store = ConfigStore::new(&path, &repo, &reporter);
    assert_eq!(store.upstream_remote_name().unwrap(), "upstream");
    assert_eq!(
        store.branch_title("feature/x").unwrap(),
        Some("Add X".to_string())
    );
    assert_eq!(
        store.base_branch("feature/x").unwrap(),
        Some("develop".to_string())
    );
    assert!(reporter.0.borrow().is_empty());
}

#[test]
fn two_clones_do_not_share_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let reporter = Collected::default();
    let clone_a = StaticRoot(Some(PathBuf::from("/src/a/gg")));
    let clone_b = StaticRoot(Some(PathBuf::from("/src/b/gg")));

    ConfigStore::new(&path, &clone_a, &reporter)
        .set_repository_config(ConfigKey::BranchPrefix, ConfigValue::from("alice/"))
        .unwrap();

    let store_b = ConfigStore::new(&path, &clone_b, &reporter);
    assert!(store_b.repository_config().unwrap().is_empty());
    assert_eq!(store_b.repository_settings().unwrap().branch_prefix, None);
}

#[test]
fn missing_upstream_name_warns_once_and_defaults_to_origin() {
    let dir = TempDir::new().unwrap();
    let repo = StaticRoot(Some(PathBuf::from("/work/project")));
    let reporter = Collected::default();
    let store = ConfigStore::new(dir.path().join("db.json"), &repo, &reporter);

    assert_eq!(store.upstream_remote_name().unwrap(), "origin");
    let messages = reporter.0.borrow();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("warn: "));
    assert!(!dir.path().join("db.json").exists());
}

#[test]
fn global_token_round_trip_outside_repository() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("db.json");
    let nowhere = StaticRoot(None);
    let reporter = Collected::default();
    let store = ConfigStore::new(&path, &nowhere, &reporter);

    assert_eq!(store.github_token().unwrap(), None);
    let previous = store
        .set_global_config(GlobalKey::GithubToken, ConfigValue::from("ghp_one"))
        .unwrap();
    assert_eq!(previous, None);
    let previous = store
        .set_global_config_str("github-token", ConfigValue::from("ghp_two"))
        .unwrap();
    assert_eq!(previous, Some(ConfigValue::from("ghp_one")));
    assert_eq!(store.github_token().unwrap(), Some("ghp_two".to_string()));

    assert!(matches!(
        store.branch_title("main").unwrap_err(),
        GgError::NotARepository(_)
    ));
}

#[test]
fn file_written_by_gg_is_readable_json_with_expected_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let repo = StaticRoot(Some(PathBuf::from("/repo")));
    let reporter = Collected::default();
    let store = ConfigStore::new(&path, &repo, &reporter);

    store
        .set_repository_config_str("disable-pr-creation", ConfigValue::from(true))
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        json["REPOS"]["/repo"]["CONFIG"]["disable-pr-creation"],
        serde_json::Value::Bool(true)
    );
    assert_eq!(json["REPOS"]["/repo"]["BRANCH_TITLES"], serde_json::json!({}));
    assert_eq!(json["GLOBAL_CONFIG"], serde_json::json!({}));
    assert!(store.repository_settings().unwrap().disable_pr_creation);
}

#[test]
fn hand_broken_file_is_reported_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "not json at all").unwrap();
    let repo = StaticRoot(Some(PathBuf::from("/repo")));
    let reporter = Collected::default();
    let store = ConfigStore::new(&path, &repo, &reporter);

    let err = store
        .set_repository_config(ConfigKey::TitlePrefix, ConfigValue::from("X-"))
        .unwrap_err();
    assert!(matches!(err, GgError::MalformedDocument { .. }));
    assert!(err.to_string().contains("malformed"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");
}
