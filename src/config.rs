//! Server configuration.
//!
//! Built once at startup from defaults, an optional TOML file and the
//! environment, then handed to the request path by reference. Nothing under
//! `api` or `finder` reads the environment.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:3000"
//!
//! [kakao]
//! base_url = "https://dapi.kakao.com"
//! timeout_secs = 10
//!
//! [search]
//! max_distance_km = 20
//! concurrency = 8
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const API_KEY_ENV: &str = "KAKAO_API_KEY";

/// Largest accepted `search.max_distance_km`
pub const MAX_DISTANCE_CEILING_KM: i64 = 100;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub kakao: KakaoConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct KakaoConfig {
    /// REST API key; usually supplied through `KAKAO_API_KEY`
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://dapi.kakao.com".to_string(),
            timeout_secs: 10,
        }
    }
}

// Hand-written so the key never ends up in a log line.
impl std::fmt::Debug for KakaoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl KakaoConfig {
    /// The key, if present and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub default_distance_km: i64,
    /// Hard cap on `distance`; bounds the number of reverse-geocode calls
    pub max_distance_km: i64,
    /// Reverse-geocode calls in flight per search
    pub concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_distance_km: crate::models::DEFAULT_DISTANCE_KM,
            max_distance_km: 20,
            concurrency: 8,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load from an optional file, then let the environment override the key.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        config.override_api_key(std::env::var(API_KEY_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Replace the key with `key` unless it is absent or blank
    pub fn override_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.kakao.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.kakao.base_url)
            .with_context(|| format!("Invalid kakao.base_url: {}", self.kakao.base_url))?;

        let search = &self.search;
        if !(0..=MAX_DISTANCE_CEILING_KM).contains(&search.max_distance_km) {
            anyhow::bail!(
                "search.max_distance_km must be between 0 and {}, got {}",
                MAX_DISTANCE_CEILING_KM,
                search.max_distance_km
            );
        }
        if !(0..=search.max_distance_km).contains(&search.default_distance_km) {
            anyhow::bail!(
                "search.default_distance_km must be between 0 and max_distance_km ({}), got {}",
                search.max_distance_km,
                search.default_distance_km
            );
        }
        if search.concurrency == 0 {
            anyhow::bail!("search.concurrency must be at least 1");
        }

        Ok(())
    }

    /// First four characters of the key followed by `****`
    pub fn masked_api_key(&self) -> Option<String> {
        self.kakao
            .api_key()
            .map(|k| format!("{}****", k.chars().take(4).collect::<String>()))
    }
}
