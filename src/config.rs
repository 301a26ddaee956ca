//! Application configuration.
//!
//! Loaded once at process start (environment, optional `.env`, optional JSON
//! file) and passed by value into the components that need it.

use crate::types::{IntelliSqlError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Hosted model API family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Infer the provider from a model name.
    ///
    /// - `claude*` / `anthropic*` → Anthropic
    /// - `gpt*` / `o1*` / `o3*` / `o4*` → OpenAI
    /// - everything else (`gemini-*`, `models/gemini-*`) → Gemini
    pub fn from_model(model: &str) -> Self {
        let name = model.strip_prefix("models/").unwrap_or(model);
        if name.starts_with("claude") || name.starts_with("anthropic") {
            LlmProvider::Anthropic
        } else if name.starts_with("gpt")
            || name.starts_with("o1")
            || name.starts_with("o3")
            || name.starts_with("o4")
        {
            LlmProvider::OpenAI
        } else {
            LlmProvider::Gemini
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GOOGLE_API_KEY",
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Default API base URL.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            LlmProvider::OpenAI => "https://api.openai.com/v1",
            LlmProvider::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "Google Gemini",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Anthropic => "Anthropic",
        }
    }
}

/// Model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider (inferred from `model` when omitted in a config file)
    #[serde(default)]
    pub provider: Option<LlmProvider>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key. Never written back to disk.
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Override for the provider base URL (proxies, tests)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout; `None` waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl LlmSettings {
    /// Resolved provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
            .unwrap_or_else(|| LlmProvider::from_model(&self.model))
    }

    /// Resolved base URL, without trailing slash. A blank override counts as unset.
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.provider().default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Request timeout. Zero counts as unset.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

/// Fixture database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the SQLite file
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Allow generated statements that modify data
    #[serde(default)]
    pub allow_writes: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            allow_writes: false,
        }
    }
}

impl DatabaseSettings {
    /// Read `INTELLISQL_DB_PATH` and `INTELLISQL_ALLOW_WRITES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the `database` section of a JSON config file. Other sections are
    /// ignored, so no API key is needed.
    pub fn from_file(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct DatabaseSection {
            #[serde(default)]
            database: DatabaseSettings,
        }

        let content = fs::read_to_string(path)?;
        let section: DatabaseSection = serde_json::from_str(&content)
            .map_err(|e| IntelliSqlError::config(format!("Invalid config {}: {}", path.display(), e)))?;

        Ok(section.database.expanded())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("INTELLISQL_DB_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let allow_writes = lookup("INTELLISQL_ALLOW_WRITES")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self { path, allow_writes }.expanded()
    }

    /// Apply command-line overrides. The path is replaced only when given;
    /// `allow_writes` can only be switched on.
    pub fn with_overrides(mut self, path: Option<&Path>, allow_writes: bool) -> Self {
        if let Some(path) = path {
            self.path = path.to_path_buf();
        }
        self.allow_writes |= allow_writes;
        self.expanded()
    }

    fn expanded(mut self) -> Self {
        self.path = expand_path(&self.path);
        self
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LlmSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data.db")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Settings {
    /// Create from environment variables.
    ///
    /// Uses `INTELLISQL_LLM_MODEL` for the model (default: "gemini-2.5-flash")
    /// and `GOOGLE_API_KEY`, `OPENAI_API_KEY` or `ANTHROPIC_API_KEY` based on model.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is not set or a numeric variable
    /// does not parse
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from a JSON file, filling the API key from the environment
    /// when the file does not carry one.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&content)
            .map_err(|e| IntelliSqlError::config(format!("Invalid config {}: {}", path.display(), e)))?;

        if settings.llm.api_key.is_empty() {
            let var = settings.llm.provider().api_key_var();
            settings.llm.api_key = std::env::var(var).map_err(|_| {
                IntelliSqlError::config(format!("{} environment variable not set", var))
            })?;
        }

        settings.database = settings.database.expanded();
        Ok(settings)
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = lookup("INTELLISQL_LLM_MODEL").unwrap_or_else(default_model);
        let provider = LlmProvider::from_model(&model);

        let api_key = lookup(provider.api_key_var())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                IntelliSqlError::config(format!(
                    "{} environment variable not set",
                    provider.api_key_var()
                ))
            })?;

        let timeout_secs = lookup("INTELLISQL_LLM_TIMEOUT_SECS")
            .map(|v| parse_var::<u64>("INTELLISQL_LLM_TIMEOUT_SECS", &v))
            .transpose()?
            .filter(|&secs| secs > 0);

        let database = DatabaseSettings::from_lookup(&lookup);

        let port = lookup("INTELLISQL_PORT")
            .map(|v| parse_var("INTELLISQL_PORT", &v))
            .transpose()?
            .unwrap_or_else(default_port);

        Ok(Self {
            llm: LlmSettings {
                provider: Some(provider),
                model,
                api_key,
                base_url: lookup("INTELLISQL_LLM_BASE_URL").filter(|url| !url.trim().is_empty()),
                timeout_secs,
                temperature: default_temperature(),
            },
            database,
            server: ServerSettings {
                host: lookup("INTELLISQL_HOST").unwrap_or_else(default_host),
                port,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| IntelliSqlError::config(format!("{} has invalid value '{}'", name, value)))
}
