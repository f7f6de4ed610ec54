//! Configuration file handling for reviewdeck
//!
//! Config is stored at `~/.config/reviewdeck/config.yaml` (or the platform
//! equivalent via `dirs::config_dir()`). Every section is optional; a missing
//! file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prompt::PromptLimits;
use crate::provider::{OpenAiApi, RoutingPolicy};

/// Config filename within the reviewdeck config directory
const FILENAME: &str = "config.yaml";

/// Application directory name
const APP_DIR: &str = "reviewdeck";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model offered first in the UI and used when a form omits one
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Local web form server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// OpenAI-compatible endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub base_url: String,

    /// API shapes the endpoint supports. The richest listed shape is used.
    pub apis: Vec<OpenAiApi>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            apis: OpenAiApi::all().to_vec(),
        }
    }
}

/// Gemini-compatible endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub base_url: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds. Unset means the HTTP client's default (none).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Everything the dispatcher needs to route and address a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSettings {
    pub routing: RoutingPolicy,
    pub openai: OpenAiSettings,
    pub gemini: GeminiSettings,
}

fn default_models() -> Vec<String> {
    [
        DEFAULT_MODEL,
        "gpt-4.1-mini",
        "gemini-2.5-flash",
        "gemini-3-flash-preview",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

/// Top-level reviewdeck configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Model identifiers offered in the UI, first is the default
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Handling of model names that match no known provider
    #[serde(default)]
    pub routing: RoutingPolicy,

    #[serde(default)]
    pub openai: OpenAiSettings,

    #[serde(default)]
    pub gemini: GeminiSettings,

    #[serde(default)]
    pub http: HttpSettings,

    /// Character budgets applied when composing prompts
    #[serde(default)]
    pub limits: PromptLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            models: default_models(),
            routing: RoutingPolicy::default(),
            openai: OpenAiSettings::default(),
            gemini: GeminiSettings::default(),
            http: HttpSettings::default(),
            limits: PromptLimits::default(),
        }
    }
}

impl Config {
    /// Return the path to the config file: `<config_dir>/reviewdeck/config.yaml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from `path` (or the standard location), falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::path() {
                Ok(p) => p,
                Err(ConfigError::NoConfigDir) => return Ok(Self::default()),
                Err(e) => return Err(e),
            },
        };
        match Self::load_from(&path) {
            Err(ConfigError::Read(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save config to a specific path, creating the directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            routing: self.routing,
            openai: self.openai.clone(),
            gemini: self.gemini.clone(),
        }
    }

    /// The model used when a caller does not name one.
    pub fn default_model(&self) -> &str {
        self.models
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_under_config_dir() {
        let path = Config::path().unwrap();
        assert!(path.ends_with("reviewdeck/config.yaml"));
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let parsed: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(parsed, Config::default());
        assert_eq!(parsed.server.bind, "127.0.0.1:5000");
        assert_eq!(parsed.models.len(), 4);
        assert_eq!(parsed.openai.apis, OpenAiApi::all());
        assert_eq!(parsed.routing, RoutingPolicy::Permissive);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let yaml = r#"
routing: strict
openai:
  apis: [completions]
limits:
  submission: 100
"#;
        let parsed: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.routing, RoutingPolicy::Strict);
        assert_eq!(parsed.openai.apis, vec![OpenAiApi::Completions]);
        assert_eq!(parsed.openai.base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(parsed.limits.submission, 100);
        assert_eq!(parsed.limits.review_submission, 8000);
        assert_eq!(parsed.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
    }

    #[test]
    fn test_default_model_is_first_listed() {
        let mut config = Config::default();
        assert_eq!(config.default_model(), "gpt-4o-mini");
        config.models = vec!["gemini-2.5-flash".into()];
        assert_eq!(config.default_model(), "gemini-2.5-flash");
        config.models.clear();
        assert_eq!(config.default_model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_timeout_omitted_when_unset() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(!yaml.contains("timeout_secs"));
    }

    #[test]
    fn test_config_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.server.bind = "127.0.0.1:8080".into();
        config.http.timeout_secs = Some(90);

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.yaml");
        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "routing: [not, a, policy]").unwrap();
        let result = Config::load_or_default(Some(&path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_provider_settings_mirror_config() {
        let mut config = Config::default();
        config.routing = RoutingPolicy::Strict;
        config.gemini.base_url = "http://localhost:9000".into();
        let settings = config.provider_settings();
        assert_eq!(settings.routing, RoutingPolicy::Strict);
        assert_eq!(settings.gemini.base_url, "http://localhost:9000");
    }
}
