//! Configure command handler.

use crate::error::Result;
use crate::output::messages::print_value_change;
use crate::prompt;
use crate::storage::{ConfigKey, ConfigStore, ConfigValue, MergeMethod, ValueKind};
use std::path::Path;

/// Change one repository setting.
///
/// With neither `key` nor `value` a menu of settings is shown; a missing
/// value is prompted for with the current value as default.
pub fn configure_command(store: &ConfigStore, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let key = match key {
        Some(k) => k.parse::<ConfigKey>()?,
        None => choose_key(store)?,
    };

    let config = store.repository_config()?;
    let current = config.get(key.as_str());

    let value = match value {
        Some(raw) => key.parse_value(raw)?,
        None => ask_value(key, current)?,
    };

    let old = store.set_repository_config(key, value.clone())?;
    print_value_change(old.map(|v| v.to_string()).as_deref(), &value.to_string());
    Ok(())
}

fn choose_key(store: &ConfigStore) -> Result<ConfigKey> {
    let repository = store.repository_id()?;
    let name = Path::new(&repository)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(repository);
    let labels: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.description()).collect();
    let index = prompt::select(
        &format!("What do you want to configure (for repo: {})", name),
        &labels,
        0,
    )?;
    Ok(ConfigKey::ALL[index])
}

fn ask_value(key: ConfigKey, current: Option<&ConfigValue>) -> Result<ConfigValue> {
    match key.kind() {
        ValueKind::Bool => {
            let default = current.and_then(ConfigValue::as_bool).unwrap_or(true);
            Ok(ConfigValue::Bool(prompt::confirm(
                &format!("{}:", key.description()),
                default,
            )?))
        }
        ValueKind::MergeMethod => {
            let labels: Vec<&str> = MergeMethod::ALL.iter().map(|m| m.as_str()).collect();
            let default = current
                .and_then(ConfigValue::as_str)
                .and_then(|s| labels.iter().position(|l| *l == s))
                .unwrap_or(0);
            let index = prompt::select(&format!("{}:", key.description()), &labels, default)?;
            Ok(ConfigValue::String(labels[index].to_string()))
        }
        ValueKind::String => {
            let default = default_text(key, current.and_then(ConfigValue::as_str));
            let answer = prompt::input(&format!("{}:", key.description()), default.as_deref())?;
            Ok(ConfigValue::String(answer))
        }
    }
}

/// Suggested text for a string setting that has no value yet.
fn default_text(key: ConfigKey, current: Option<&str>) -> Option<String> {
    if let Some(current) = current.filter(|c| !c.is_empty()) {
        return Some(current.to_string());
    }
    match key {
        ConfigKey::BranchPrefix => std::env::var("USER").ok().map(|u| format!("{}/", u)),
        ConfigKey::UpstreamName => Some("origin".to_string()),
        _ => None,
    }
}
