use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV_PREFIX: &str = "LECTURE_TUI";

pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_DOWNLOAD_NAME: &str = "Lecture.pdf";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub downloads: DownloadConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: None,
            timeout: default_timeout(),
        }
    }
}

impl CatalogConfig {
    /// Where the catalog is read from: a local file if one is configured,
    /// otherwise `data.json` next to the configured site.
    pub fn location(&self) -> String {
        if let Some(path) = self.path.as_ref() {
            return path.display().to_string();
        }
        let base = self.base_url.trim();
        if base.is_empty() {
            return DEFAULT_DATA_FILE.to_string();
        }
        match url::Url::parse(base).and_then(|url| url.join(DEFAULT_DATA_FILE)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}/{}", base.trim_end_matches('/'), DEFAULT_DATA_FILE),
        }
    }
}

fn default_base_url() -> String {
    String::new()
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadConfig {
    #[serde(default = "default_download_dir")]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
            file_name: default_file_name(),
        }
    }
}

fn default_download_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
}

fn default_file_name() -> String {
    DEFAULT_DOWNLOAD_NAME.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlayerConfig {
    /// Command used for the video pane's external playback. `%URL%` is
    /// replaced with the video link; an empty list means the system browser.
    #[serde(default)]
    pub video_command: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        if path.exists() {
            let from_file = read_config_file(path)?;
            cfg = merge_config(cfg, from_file);
        }
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let from_file = read_config_file(&default_path)?;
            cfg = merge_config(cfg, from_file);
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    cfg = apply_env(cfg, &collect_env(prefix));

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn merge_config(mut base: Config, other: Config) -> Config {
    if !other.catalog.base_url.is_empty() {
        base.catalog.base_url = other.catalog.base_url;
    }
    if other.catalog.path.is_some() {
        base.catalog.path = other.catalog.path;
    }
    if !other.catalog.timeout.is_zero() {
        base.catalog.timeout = other.catalog.timeout;
    }

    if other.downloads.dir.is_some() {
        base.downloads.dir = other.downloads.dir;
    }
    if !other.downloads.file_name.trim().is_empty() {
        base.downloads.file_name = other.downloads.file_name;
    }

    if !other.player.video_command.is_empty() {
        base.player.video_command = other.player.video_command;
    }

    base
}

fn collect_env(prefix: &str) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }
    map
}

fn apply_env(mut cfg: Config, vars: &HashMap<String, String>) -> Config {
    for (key, value) in vars {
        apply_env_value(&mut cfg, key, value.clone());
    }
    cfg
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "catalog.base_url" => cfg.catalog.base_url = value,
        "catalog.path" => {
            if !value.trim().is_empty() {
                cfg.catalog.path = Some(PathBuf::from(value));
            }
        }
        "catalog.timeout" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.catalog.timeout = duration;
            }
        }
        "downloads.dir" => cfg.downloads.dir = Some(PathBuf::from(value)),
        "downloads.file_name" => {
            if !value.trim().is_empty() {
                cfg.downloads.file_name = value;
            }
        }
        "player.video_command" => {
            cfg.player.video_command = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        _ => {}
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lecture-tui").join("config.yaml"))
}
