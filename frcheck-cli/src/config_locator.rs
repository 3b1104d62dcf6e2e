// Config file discovery for the CLI.
//
// Lookup order: --config, then <config dir>/frcheck/config.yaml, then the
// built-in defaults. An explicit --config that cannot be loaded is an error;
// a broken user-level file only logs a warning.

use anyhow::Result;
use frcheck_core::ScanConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = "frcheck";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with --config
    Explicit(PathBuf),
    /// Found in the platform config directory
    UserDefault(PathBuf),
    BuiltIn,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Explicit(path) => format!("Loaded config from: {}", path.display()),
            ConfigSource::UserDefault(path) => {
                format!("Loaded user config from: {}", path.display())
            }
            ConfigSource::BuiltIn => "Using default config".to_string(),
        }
    }
}

/// `~/.config/frcheck/config.yaml` on Linux, the platform equivalent elsewhere.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn locate_config(explicit: Option<&str>) -> ConfigSource {
    locate_config_in(explicit, user_config_path().as_deref())
}

fn locate_config_in(explicit: Option<&str>, user_path: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(PathBuf::from(path));
    }
    match user_path {
        Some(path) if path.is_file() => ConfigSource::UserDefault(path.to_path_buf()),
        _ => ConfigSource::BuiltIn,
    }
}

pub fn load_config(source: &ConfigSource) -> Result<ScanConfig> {
    match source {
        ConfigSource::Explicit(path) => ScanConfig::load_from_file(&path.to_string_lossy()),
        ConfigSource::UserDefault(path) => {
            let path = path.to_string_lossy();
            Ok(ScanConfig::load_with_fallback(Some(&*path)))
        }
        ConfigSource::BuiltIn => Ok(ScanConfig::default()),
    }
}
