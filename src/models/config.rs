//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library locations.
    pub library: LibraryConfig,
    /// Classifier configuration.
    pub classifier: ClassifierConfig,
    /// Apply behavior.
    pub apply: ApplyConfig,
    /// Directory holding pending plan files.
    pub plans_dir: PathBuf,
}

/// Library locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Folder holding one unorganized subfolder per series.
    pub unordered_dir: PathBuf,
    /// Root of the organized tree.
    pub organized_dir: PathBuf,
}

/// Classifier (DeepSeek-compatible chat API) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// API base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// API key.
    pub api_key: Option<String>,
}

/// What to do when a single file cannot be linked or copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkErrorPolicy {
    /// End the pass with an error event.
    #[default]
    Abort,
    /// Log the file, leave it out of the record and continue. The stream
    /// then ends with `Progress.current` below the announced `total`.
    Skip,
}

/// Apply behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    /// Policy for per-file link failures.
    pub on_link_error: LinkErrorPolicy,
    /// Verify checksums when falling back to a copy.
    pub verify_copies: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: LibraryConfig::default(),
            classifier: ClassifierConfig::default(),
            apply: ApplyConfig::default(),
            plans_dir: dirs_config_path().join("plans"),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            unordered_dir: PathBuf::from("tv_unordered"),
            organized_dir: PathBuf::from("tv"),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.3,
            timeout: 120,
            api_key: None,
        }
    }
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            on_link_error: LinkErrorPolicy::Abort,
            verify_copies: true,
        }
    }
}

impl ClassifierConfig {
    /// Apply `DEEPSEEK_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("DEEPSEEK_API_KEY") {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("DEEPSEEK_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(model) = std::env::var("DEEPSEEK_MODEL") {
            self.model = model;
        }
        if let Some(timeout) = std::env::var("DEEPSEEK_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.timeout = timeout;
        }
    }
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("series_organizer")
}

/// Parse configuration text, falling back to defaults on error.
pub fn parse_config(content: &str) -> Config {
    match toml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid config file: {}", e);
            Config::default()
        }
    }
}

/// Load configuration from file, then apply environment overrides.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    let mut config = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => parse_config(&content),
            Err(_) => Config::default(),
        }
    } else {
        Config::default()
    };

    config.classifier.apply_env();
    config
}
