use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxError};

const CONFIG_DIR: &str = "voxd";
const MAIN_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub weather: WeatherConfig,
    pub launcher: LauncherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub max_reply_words: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            max_reply_words: 100,
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub units: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org/data/2.5/weather".to_string(),
            units: "metric".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Launch command lines are configuration, not code: the dispatch algorithm
/// never hardcodes a platform-specific program name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub notepad: Vec<String>,
    pub chrome: Vec<String>,
    pub calculator: Vec<String>,
    /// Command the browser-open side effect prepends to a URL
    pub url_opener: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        if cfg!(target_os = "windows") {
            Self {
                notepad: argv(&["notepad"]),
                chrome: argv(&["cmd", "/C", "start", "chrome"]),
                calculator: argv(&["calc"]),
                url_opener: argv(&["cmd", "/C", "start", ""]),
            }
        } else if cfg!(target_os = "macos") {
            Self {
                notepad: argv(&["open", "-a", "TextEdit"]),
                chrome: argv(&["open", "-a", "Google Chrome"]),
                calculator: argv(&["open", "-a", "Calculator"]),
                url_opener: argv(&["open"]),
            }
        } else {
            Self {
                notepad: argv(&["gedit"]),
                chrome: argv(&["google-chrome"]),
                calculator: argv(&["gnome-calculator"]),
                url_opener: argv(&["xdg-open"]),
            }
        }
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

impl AppConfig {
    /// Load from an explicit path, or the platform config dir. A missing or
    /// unparsable file falls back to defaults with a warning.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if explicit_path.is_some() && !path.exists() {
            return Err(VoxError::ConfigNotFound { path });
        }

        Ok(Self::load_toml_file(&path).unwrap_or_default())
    }

    pub fn default_path() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR).join(MAIN_CONFIG_FILE))
            .ok_or_else(|| VoxError::Config("Could not determine config directory".to_string()))
    }

    fn load_toml_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }
}
