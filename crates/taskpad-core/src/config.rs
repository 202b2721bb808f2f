use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskpadConfig {
    /// Path of the tasks file. Relative paths resolve against the directory
    /// the config was loaded from.
    pub tasks_file: Option<String>,
}

pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

pub fn config_filename_candidates() -> [&'static str; 2] {
    [".taskpad.toml", ".taskpadrc"]
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(".taskpad.toml")
}

pub fn resolve_user_home_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    if let Ok(profile) = std::env::var("USERPROFILE") {
        let trimmed = profile.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    None
}

pub fn resolve_taskpad_home_dir() -> Option<PathBuf> {
    if let Ok(value) = std::env::var("TASKPAD_HOME") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    resolve_user_home_dir().map(|home| home.join(".taskpad"))
}

pub fn global_config_path() -> Option<PathBuf> {
    resolve_taskpad_home_dir().map(|home| home.join("config.toml"))
}

/// Config files are best effort: unreadable or unparseable files read as no
/// config at all.
pub fn load_config(root: &Path) -> Option<TaskpadConfig> {
    for name in config_filename_candidates() {
        let path = root.join(name);
        if path.is_file() {
            if let Ok(text) = fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str::<TaskpadConfig>(&text) {
                    return Some(config);
                }
            }
        }
    }
    None
}

pub fn load_global_config() -> Option<TaskpadConfig> {
    let path = global_config_path()?;
    if !path.is_file() {
        return None;
    }
    let text = fs::read_to_string(path).ok()?;
    toml::from_str::<TaskpadConfig>(&text).ok()
}

/// Where the tasks file lives: project config, then global config, then
/// `tasks.json` under `root`. Relative config values resolve against `root`
/// (project) or the taskpad home dir (global).
pub fn resolve_tasks_file_with_source(root: &Path) -> (PathBuf, &'static str) {
    if let Some(value) = load_config(root).and_then(|config| config.tasks_file) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return (resolve_against(root, trimmed), "project");
        }
    }
    if let Some(value) = load_global_config().and_then(|config| config.tasks_file) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            let base = resolve_taskpad_home_dir().unwrap_or_else(|| root.to_path_buf());
            return (resolve_against(&base, trimmed), "global");
        }
    }
    (root.join(DEFAULT_TASKS_FILE), "default")
}

pub fn resolve_tasks_file(root: &Path) -> PathBuf {
    resolve_tasks_file_with_source(root).0
}

pub fn write_config(root: &Path, config: &TaskpadConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path(root);
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}

fn resolve_against(base: &Path, value: &str) -> PathBuf {
    let candidate = PathBuf::from(value);
    if candidate.is_absolute() {
        candidate
    } else {
        base.join(candidate)
    }
}
