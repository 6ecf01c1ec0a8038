//! Handlers for the `config` subcommands.
//!
//! Generic over [`ConfigManager`] so the same commands work for any config
//! type, plus TOML dotted-key helpers.

use std::path::PathBuf;

use seatwise_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::{ConfigManager, SeatwiseConfig};

const MASK: &str = "********";

// ============================================================================
// Command dispatch
// ============================================================================

/// Runs a config subcommand against [`SeatwiseConfig`].
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path::<SeatwiseConfig>(config_path),
        ConfigAction::Show => cmd_config_show::<SeatwiseConfig>(config_path),
        ConfigAction::Get { key } => cmd_config_get::<SeatwiseConfig>(config_path, &key),
        ConfigAction::Init { file, force } => {
            cmd_config_init::<SeatwiseConfig>(file.as_deref(), force).map(|path| {
                println!("Config file created at {}", path.display());
            })
        }
        ConfigAction::Export => {
            let config = SeatwiseConfig::load(config_path)?;
            for (key, value) in config.to_env_vars() {
                println!("{key}={value}");
            }
            Ok(())
        }
    }
}

// ============================================================================
// Generic command handlers
// ============================================================================

/// Prints the resolved config file path.
pub fn cmd_config_path<C: ConfigManager>(config_path: Option<&str>) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!(
            "(file does not exist; run `{} config init` to create it)",
            C::project_name()
        );
    }
    Ok(())
}

/// Prints the effective configuration as TOML with secrets masked.
pub fn cmd_config_show<C: ConfigManager>(config_path: Option<&str>) -> Result<()> {
    let config = C::load(config_path)?;
    let mut value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    mask_secrets(&mut value);
    let text = toml::to_string_pretty(&value).map_err(|e| Error::config(e.to_string()))?;
    print!("{text}");
    Ok(())
}

/// Prints one value by dotted key.
pub fn cmd_config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    println!("{}", format_toml_value(found));
    Ok(())
}

/// Writes a default config file, returning where it went.
pub fn cmd_config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, C::default().to_toml_string()?)?;
    Ok(path)
}

// ============================================================================
// TOML helpers
// ============================================================================

/// Follows a dotted key through nested tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Replaces every non-empty `api_key` string with a mask.
pub fn mask_secrets(value: &mut toml::Value) {
    let Some(table) = value.as_table_mut() else {
        return;
    };
    for (key, entry) in table.iter_mut() {
        if entry.is_table() {
            mask_secrets(entry);
        } else if let toml::Value::String(s) = entry
            && key == "api_key"
            && !s.is_empty()
        {
            *s = MASK.to_string();
        }
    }
}

/// Renders a TOML value for stdout; scalars without quotes.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
