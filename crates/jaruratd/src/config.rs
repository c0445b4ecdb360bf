//! Configuration management for jaruratd.
//!
//! Loads settings from a TOML file or uses defaults. Every field has a
//! default so partial files are valid.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// System-wide config file path
pub const CONFIG_PATH: &str = "/etc/jarurat/config.toml";

/// Environment variable naming an alternate config file
pub const CONFIG_ENV: &str = "JARURAT_CONFIG";

/// Environment variable overriding the provider model
pub const MODEL_ENV: &str = "GROQ_MODEL";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Directory holding the JSON collections
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Browser origins allowed by CORS
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            data_dir: default_data_dir(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// AI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_enabled")]
    pub enabled: bool,

    /// Tag recorded as `aiProvider` on successful calls
    #[serde(default = "default_provider")]
    pub provider: String,

    /// OpenAI-compatible base URL (without /chat/completions)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Whole-call budget; expiry falls back to rule-based triage
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_ai_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "groq".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout() -> u64 {
    10
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: default_ai_enabled(),
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

impl AiConfig {
    /// API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

/// Keyword sets for urgency detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default = "default_high_keywords")]
    pub high_keywords: Vec<String>,

    #[serde(default = "default_medium_keywords")]
    pub medium_keywords: Vec<String>,
}

fn default_high_keywords() -> Vec<String> {
    [
        "oxygen",
        "breath",
        "breathing",
        "chest pain",
        "unconscious",
        "bleeding",
        "stroke",
        "emergency",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_medium_keywords() -> Vec<String> {
    [
        "fever",
        "vomit",
        "vomiting",
        "infection",
        "pain",
        "weakness",
        "dehydration",
        "fracture",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            high_keywords: default_high_keywords(),
            medium_keywords: default_medium_keywords(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub triage: TriageConfig,
}

/// A place a config file is looked for
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSource {
    pub path: PathBuf,
    /// Named by `--config` or $JARURAT_CONFIG rather than the system default
    pub requested: bool,
}

impl ConfigSource {
    /// Lookup order: explicit path, then $JARURAT_CONFIG, then /etc
    pub fn candidates(explicit: Option<&Path>, env_path: Option<PathBuf>) -> Vec<ConfigSource> {
        explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(env_path)
            .map(|path| ConfigSource {
                path,
                requested: true,
            })
            .chain(std::iter::once(ConfigSource {
                path: PathBuf::from(CONFIG_PATH),
                requested: false,
            }))
            .collect()
    }

    /// Warning for a source that failed to load. A missing system default is
    /// silent; a missing requested file is not.
    pub fn skip_warning(&self, err: &anyhow::Error) -> Option<String> {
        if self.path.exists() {
            Some(format!("Ignoring config {}: {}", self.path.display(), err))
        } else if self.requested {
            Some(format!(
                "Config file {} not found, trying next location",
                self.path.display()
            ))
        } else {
            None
        }
    }
}

impl Config {
    /// Load config: explicit path, then $JARURAT_CONFIG, then /etc, then defaults.
    /// Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Self {
        let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let candidates = ConfigSource::candidates(explicit, env_path);

        let mut config = candidates
            .iter()
            .find_map(|source| match Self::load_from_path(&source.path) {
                Ok(c) => Some(c),
                Err(e) => {
                    if let Some(message) = source.skip_warning(&e) {
                        warn!("{}", message);
                    }
                    None
                }
            })
            .unwrap_or_else(|| {
                warn!("Config not found, using defaults");
                Config::default()
            });

        config.apply_env();
        config
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.ai.model = model.trim().to_string();
            }
        }
    }

    /// Save default config to path (for init)
    pub fn save_default(path: &Path) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Saved default config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.ai.provider, "groq");
        assert_eq!(config.ai.model, "llama-3.1-8b-instant");
        assert_eq!(config.ai.max_tokens, 500);
        assert_eq!(config.ai.timeout_secs, 10);
        assert!((config.ai.temperature - 0.2).abs() < f32::EPSILON);
        assert!(config.triage.high_keywords.contains(&"chest pain".to_string()));
        assert_eq!(config.server.cors_origins.len(), 2);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[ai]
model = "llama-3.3-70b-versatile"
timeout_secs = 5

[triage]
medium_keywords = ["nausea"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ai.model, "llama-3.3-70b-versatile");
        assert_eq!(config.ai.timeout_secs, 5);
        assert_eq!(config.ai.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.triage.medium_keywords, vec!["nausea".to_string()]);
        assert!(config.triage.high_keywords.contains(&"oxygen".to_string()));
        assert_eq!(config.server.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_load_from_path_and_save_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("etc").join("config.toml");
        Config::save_default(&path).unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.server.bind, default_bind());
        assert_eq!(config.triage.high_keywords, default_high_keywords());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ai\nmodel = ").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_candidates_order() {
        let sources = ConfigSource::candidates(
            Some(Path::new("/tmp/cli.toml")),
            Some(PathBuf::from("/tmp/env.toml")),
        );
        let paths: Vec<&Path> = sources.iter().map(|s| s.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![
                Path::new("/tmp/cli.toml"),
                Path::new("/tmp/env.toml"),
                Path::new(CONFIG_PATH)
            ]
        );
        assert!(sources[0].requested && sources[1].requested);
        assert!(!sources[2].requested);
    }

    #[test]
    fn test_missing_requested_config_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("jarurat.toml");
        let sources = ConfigSource::candidates(Some(&missing), None);
        let err = Config::load_from_path(&missing).unwrap_err();

        let warning = sources[0].skip_warning(&err).unwrap();
        assert!(warning.contains(&missing.display().to_string()));
        assert!(warning.contains("not found"));

        let system_default = ConfigSource {
            path: dir.path().join("etc").join("config.toml"),
            requested: false,
        };
        assert_eq!(system_default.skip_warning(&err), None);
    }

    #[test]
    fn test_invalid_requested_config_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\n").unwrap();
        let source = ConfigSource {
            path: path.clone(),
            requested: true,
        };
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(source.skip_warning(&err).unwrap().starts_with("Ignoring config"));
    }

    #[test]
    fn test_api_key_missing_env() {
        let ai = AiConfig {
            api_key_env: "JARURAT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..AiConfig::default()
        };
        assert_eq!(ai.api_key(), None);
    }
}
