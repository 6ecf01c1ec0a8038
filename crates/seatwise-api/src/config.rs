//! Service configuration.
//!
//! Resolution, lowest precedence first: built-in defaults, the TOML file,
//! then `SEATWISE_*` environment variables. The resolved [`SeatwiseConfig`]
//! is built once at startup and handed to every collaborator constructor.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use seatwise_core::{Error, Result};

// ============================================================================
// ConfigManager
// ============================================================================

/// Loading and locating a project's configuration file.
pub trait ConfigManager: Sized + Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and CLI hints.
    fn project_name() -> &'static str;

    /// Environment variable naming an explicit config file.
    fn config_env_var() -> &'static str;

    /// Applies environment overrides looked up through `lookup`.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>;

    /// `<config_dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Explicit path, then the env var, then the default location.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(Self::config_env_var()).ok().map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Loads the file if it exists, then applies process environment overrides.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                toml::from_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?
            }
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Pretty TOML rendering.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// SeatwiseConfig
// ============================================================================

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatwiseConfig {
    /// Use scripted upstream collaborators instead of real endpoints.
    pub mock_upstream: bool,
    /// HTTP listener.
    pub server: ServerConfig,
    /// Reference tables.
    pub data: DataConfig,
    /// Chat-completion endpoint.
    pub llm: LlmConfig,
    /// Web search endpoint.
    pub search: SearchConfig,
    /// Image generation endpoint.
    pub image: ImageConfig,
    /// Pacing of locally generated streams.
    pub relay: RelayConfig,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

/// `[data]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the JSON tables.
    pub dir: PathBuf,
}

/// `[llm]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model for consultation, design and extraction.
    pub model: String,
    /// Model for report audits.
    pub audit_model: String,
    /// Default sampling temperature.
    pub temperature: f32,
    /// Per-call deadline, seconds.
    pub timeout_secs: u64,
    /// Retries for transient failures.
    pub max_retries: usize,
}

/// `[search]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search API base URL.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Per-query deadline, seconds.
    pub timeout_secs: u64,
    /// Brands compared in design reports; empty means the catalog's
    /// comparison brands.
    pub brands: Vec<String>,
}

/// `[image]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Image API base URL.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Output size.
    pub size: String,
    /// Per-call deadline, seconds.
    pub timeout_secs: u64,
}

/// `[relay]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Characters per chunk of a locally generated stream.
    pub chunk_size: usize,
    /// Pause between chunks, milliseconds.
    pub chunk_delay_ms: u64,
}

impl Default for SeatwiseConfig {
    fn default() -> Self {
        Self {
            mock_upstream: true,
            server: ServerConfig::default(),
            data: DataConfig::default(),
            llm: LlmConfig::default(),
            search: SearchConfig::default(),
            image: ImageConfig::default(),
            relay: RelayConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ark.cn-beijing.volces.com/api/v3".to_string(),
            api_key: String::new(),
            model: "doubao-seed-1-8-251228".to_string(),
            audit_model: "deepseek-r1-250528".to_string(),
            temperature: 0.7,
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8081".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            brands: Vec::new(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ark.cn-beijing.volces.com/api/v3".to_string(),
            api_key: String::new(),
            model: "doubao-seedream-4-0-250828".to_string(),
            size: "2K".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            chunk_size: 20,
            chunk_delay_ms: 30,
        }
    }
}

impl LlmConfig {
    /// Per-call deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SearchConfig {
    /// Per-query deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ImageConfig {
    /// Per-call deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RelayConfig {
    /// Pause between chunks.
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}

impl SeatwiseConfig {
    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.relay.chunk_size == 0 {
            return Err(Error::config("relay.chunk_size must be at least 1"));
        }
        if !self.mock_upstream && self.llm.api_key.is_empty() {
            return Err(Error::config(
                "llm.api_key (or SEATWISE_LLM_API_KEY) is required when mock_upstream = false",
            ));
        }
        Ok(())
    }

    /// Environment variables equivalent to this configuration.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        vec![
            ("SEATWISE_HOST".to_string(), self.server.host.clone()),
            ("SEATWISE_PORT".to_string(), self.server.port.to_string()),
            (
                "SEATWISE_DATA_DIR".to_string(),
                self.data.dir.display().to_string(),
            ),
            ("SEATWISE_LLM_BASE_URL".to_string(), self.llm.base_url.clone()),
            ("SEATWISE_LLM_MODEL".to_string(), self.llm.model.clone()),
            (
                "SEATWISE_MOCK_UPSTREAM".to_string(),
                self.mock_upstream.to_string(),
            ),
        ]
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{key} has an invalid value '{value}'")))
}

impl ConfigManager for SeatwiseConfig {
    fn project_name() -> &'static str {
        "seatwise"
    }

    fn config_env_var() -> &'static str {
        "SEATWISE_CONFIG"
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SEATWISE_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SEATWISE_PORT") {
            self.server.port = parse_env("SEATWISE_PORT", &v)?;
        }
        if let Some(v) = lookup("SEATWISE_DATA_DIR") {
            self.data.dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SEATWISE_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = lookup("SEATWISE_LLM_API_KEY") {
            self.llm.api_key = v;
        }
        if let Some(v) = lookup("SEATWISE_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = lookup("SEATWISE_SEARCH_API_KEY") {
            self.search.api_key = v;
        }
        if let Some(v) = lookup("SEATWISE_IMAGE_API_KEY") {
            self.image.api_key = v;
        }
        if let Some(v) = lookup("SEATWISE_MOCK_UPSTREAM") {
            self.mock_upstream = parse_env("SEATWISE_MOCK_UPSTREAM", &v)?;
        }
        Ok(())
    }
}
