use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub n2yo: ServiceConfig,
    pub opencage: ServiceConfig,
    #[serde(deserialize_with = "deserialize_duration")]
    pub upstream_timeout: Duration,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            n2yo: ServiceConfig::default(),
            opencage: ServiceConfig::default(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub port: u16,
    pub cors_origin: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_entries: 1024,
        }
    }
}

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(8);
pub const N2YO_BASE_URL: &str = "https://api.n2yo.com";
pub const OPENCAGE_BASE_URL: &str = "https://api.opencagedata.com";

pub const N2YO_API_KEY: &str = "N2YO_API_KEY";
pub const OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overlays the recognised environment variables onto this config.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.web.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            self.web.cors_origin = origin;
        }
        if let Some(key) = lookup(N2YO_API_KEY) {
            self.n2yo.api_key = Some(key);
        }
        if let Some(key) = lookup(OPENCAGE_API_KEY) {
            self.opencage.api_key = Some(key);
        }
        Ok(())
    }

    pub fn n2yo_api_key(&self) -> Option<&str> {
        non_empty(self.n2yo.api_key.as_deref())
    }

    pub fn opencage_api_key(&self) -> Option<&str> {
        non_empty(self.opencage.api_key.as_deref())
    }

    pub fn n2yo_base_url(&self) -> &str {
        self.n2yo.base_url.as_deref().unwrap_or(N2YO_BASE_URL)
    }

    pub fn opencage_base_url(&self) -> &str {
        self.opencage.base_url.as_deref().unwrap_or(OPENCAGE_BASE_URL)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.web.port)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}
