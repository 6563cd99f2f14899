// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::utils::normalize_base_url;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Everything the client needs to reach the analysis backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentSection {
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve configuration at startup.
    ///
    /// An explicit base URL (flag or `API_BASE_URL`) wins over the config
    /// file. The file is optional unless it was named explicitly.
    pub fn load(explicit_base: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading client configuration for environment: {}", environment);

        let section = match config_path {
            Some(path) => Self::load_section(path, &environment)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_section(default_path, &environment)?
                } else {
                    EnvironmentSection::default()
                }
            }
        };

        Self::resolve(explicit_base, section)
    }

    fn get_environment() -> String {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_section(path: &Path, environment: &str) -> Result<EnvironmentSection> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_section(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse_section(content: &str, environment: &str) -> Result<EnvironmentSection> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    pub fn resolve(explicit_base: Option<&str>, section: EnvironmentSection) -> Result<Self> {
        let base = explicit_base
            .map(str::to_string)
            .or(section.api_base_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "API base URL not configured. Pass --api-base, set API_BASE_URL or add api_base_url to {}",
                    DEFAULT_CONFIG_FILE
                )
            })?;

        let base = normalize_base_url(&base);
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!("API base URL must start with http:// or https://: {}", base);
        }

        let config = Self::new(&base);
        Ok(match section.timeout_seconds {
            Some(seconds) => config.with_timeout(Duration::from_secs(seconds)),
            None => config,
        })
    }
}
