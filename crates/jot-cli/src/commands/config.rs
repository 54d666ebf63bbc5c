//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use jot_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "notes_file": config.notes_path(),
                    "log_file": config.log_path()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.notes_path().display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:   {}", config.data_dir.display());
            println!("  notes_file: {}", config.notes_path().display());
            println!("  log_file:   {}", config.log_path().display());
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply a single `key = value` change; empty or `none` clears optional paths
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let optional_path = || {
        if value.is_empty() || value == "none" {
            None
        } else {
            Some(PathBuf::from(value))
        }
    };

    match key {
        "data_dir" => {
            if value.is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "notes_file" => config.notes_file = optional_path(),
        "log_file" => config.log_file = optional_path(),
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, notes_file, log_file",
                key
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            data_dir: PathBuf::from("/data/jot"),
            notes_file: Some(PathBuf::from("/data/custom.json")),
            log_file: None,
        }
    }

    #[test]
    fn test_apply_data_dir() {
        let mut config = base();
        apply_setting(&mut config, "data_dir", "/other").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/other"));
        assert!(apply_setting(&mut config, "data_dir", "").is_err());
    }

    #[test]
    fn test_apply_clears_optional_path() {
        let mut config = base();
        apply_setting(&mut config, "notes_file", "none").unwrap();
        assert!(config.notes_file.is_none());

        apply_setting(&mut config, "log_file", "/tmp/jot.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/jot.log")));
    }

    #[test]
    fn test_apply_unknown_key() {
        let mut config = base();
        let err = apply_setting(&mut config, "sync_url", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }
}
