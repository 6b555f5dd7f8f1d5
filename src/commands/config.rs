//! Config command handler.

use super::token::mask_secret;
use crate::error::Result;
use crate::output::{print_table, GRAY, RESET};
use crate::storage::{ConfigKey, ConfigStore, ConfigValue, GlobalKey};
use std::collections::BTreeMap;

/// Print the current repository's settings, or the global ones.
pub fn config_command(store: &ConfigStore, global: bool) -> Result<()> {
    let rows = if global {
        global_rows(&store.global_config()?)
    } else {
        repository_rows(&store.repository_config()?)
    };
    print_table(&rows);
    println!();
    println!("{GRAY}Stored in {}{RESET}", store.path().display());
    Ok(())
}

/// Every known key in order, then anything else found in the file.
fn repository_rows(config: &BTreeMap<String, ConfigValue>) -> Vec<(String, Option<String>)> {
    let mut rows: Vec<(String, Option<String>)> = ConfigKey::ALL
        .iter()
        .map(|key| {
            (
                key.as_str().to_string(),
                config.get(key.as_str()).map(ConfigValue::to_string),
            )
        })
        .collect();
    rows.extend(
        config
            .iter()
            .filter(|(k, _)| k.parse::<ConfigKey>().is_err())
            .map(|(k, v)| (k.clone(), Some(v.to_string()))),
    );
    rows
}

fn global_rows(config: &BTreeMap<String, ConfigValue>) -> Vec<(String, Option<String>)> {
    config
        .iter()
        .map(|(k, v)| {
            let secret = k.parse::<GlobalKey>().map(GlobalKey::is_secret).unwrap_or(false);
            let shown = if secret {
                mask_secret(&v.to_string())
            } else {
                v.to_string()
            };
            (k.clone(), Some(shown))
        })
        .collect()
}
