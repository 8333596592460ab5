//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tubeline_youtube::VideoDuration;
use tubeline_youtube::api::{DEFAULT_BASE_URL, MAX_PAGE_SIZE};
use tubeline_youtube::config::{
    DEFAULT_KEYWORDS, DEFAULT_LANGUAGE, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT, DEFAULT_TOKEN_LOG,
};

/// Global configuration for tubeline
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub youtube: YouTubeConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: std::env::var("YOUTUBE_API_KEY").ok(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub duration: VideoDuration,
    /// Empty string disables `relevanceLanguage`
    pub language: String,
    pub max_pages: usize,
    pub page_size: u8,
    pub save_page_tokens: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            duration: VideoDuration::Long,
            language: DEFAULT_LANGUAGE.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            page_size: MAX_PAGE_SIZE,
            save_page_tokens: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub token_log: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            token_log: PathBuf::from(DEFAULT_TOKEN_LOG),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./tubeline.toml (current directory)
    /// 2. ~/.config/tubeline/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("tubeline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "tubeline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.search.duration, VideoDuration::Long);
        assert_eq!(config.search.language, "ru");
        assert_eq!(config.search.max_pages, 3);
        assert_eq!(config.search.page_size, 50);
        assert_eq!(config.output.path, PathBuf::from("audiobooks.csv"));
        assert_eq!(config.filter.keywords, ["аудиокниг", "радиоспектакл"]);
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_TUBELINE_12345}"), None);
    }

    #[test]
    fn expand_env_var_set() {
        // PATH is set in any test environment
        let path = std::env::var("PATH").ok();
        assert_eq!(expand_env_var("${PATH}"), path);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[youtube]
api_key = "literal-key"
timeout_secs = 10

[search]
duration = "medium"
language = "en"
max_pages = 5

[output]
path = "/tmp/radio.csv"

[filter]
keywords = ["radio play", "audiobook"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.youtube.api_key.as_deref(), Some("literal-key"));
        assert_eq!(config.youtube.timeout_secs, 10);
        assert_eq!(config.search.duration, VideoDuration::Medium);
        assert_eq!(config.search.language, "en");
        assert_eq!(config.search.max_pages, 5);
        // Untouched keys keep defaults
        assert_eq!(config.search.page_size, 50);
        assert_eq!(config.output.path, PathBuf::from("/tmp/radio.csv"));
        assert_eq!(config.output.token_log, PathBuf::from("page_token.txt"));
        assert_eq!(config.filter.keywords, ["radio play", "audiobook"]);
    }

    #[test]
    fn unknown_duration_is_parse_error() {
        let err = toml::from_str::<Config>("[search]\nduration = \"epic\"\n");
        assert!(err.is_err());
    }
}
