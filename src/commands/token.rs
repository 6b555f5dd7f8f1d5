//! GitHub token command handler.

use crate::error::{GgError, Result};
use crate::output::{print_info, print_success, print_warning};
use crate::prompt;
use crate::storage::{ConfigStore, ConfigValue, GlobalKey};

/// Store the GitHub token, or print the stored one masked with `show`.
pub fn token_command(store: &ConfigStore, token: Option<&str>, show: bool) -> Result<()> {
    if show {
        match store.github_token()? {
            Some(token) => println!("{}", mask_secret(&token)),
            None => print_warning("No GitHub token stored. Run `gg github token` to add one."),
        }
        return Ok(());
    }

    let token = match token {
        Some(t) => t.trim().to_string(),
        None => {
            print_info("Create one at https://github.com/settings/tokens");
            prompt::input("Token:", None)?.trim().to_string()
        }
    };
    if token.is_empty() {
        return Err(GgError::Command("No token provided".to_string()));
    }

    let previous = store.set_global_config(GlobalKey::GithubToken, ConfigValue::String(token.clone()))?;
    match previous.as_ref().and_then(ConfigValue::as_str) {
        Some(old) if old == token => print_success("GitHub token unchanged"),
        Some(_) => {
            print_warning("Replaced the previously stored GitHub token");
            print_success("GitHub token saved");
        }
        None => print_success("GitHub token saved"),
    }
    Ok(())
}

/// Keep the first and last four characters, star out the rest.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FixedRepository, RecordingReporter};
    use tempfile::TempDir;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("ghp_1234567890"), "ghp_******7890");
        assert_eq!(mask_secret("short"), "*****");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_token_command_stores_token_outside_repository() {
        let db_dir = TempDir::new().unwrap();
        let resolver = FixedRepository::outside();
        let reporter = RecordingReporter::default();
        let store = ConfigStore::new(db_dir.path().join("db.json"), &resolver, &reporter);

        token_command(&store, Some("  ghp_secret  "), false).unwrap();
        assert_eq!(store.github_token().unwrap(), Some("ghp_secret".to_string()));

        token_command(&store, None, true).unwrap();
    }

    #[test]
    fn test_token_command_rejects_empty_token() {
        let db_dir = TempDir::new().unwrap();
        let resolver = FixedRepository::outside();
        let reporter = RecordingReporter::default();
        let store = ConfigStore::new(db_dir.path().join("db.json"), &resolver, &reporter);

        assert!(token_command(&store, Some("   "), false).is_err());
        assert!(!db_dir.path().join("db.json").exists());
    }
}
