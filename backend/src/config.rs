//! Runtime configuration.
//!
//! Read from a YAML file (`dashboard.yaml`, or the path in `DMC_CONFIG`).
//! Every field has a default, and a missing file means all defaults.
//! `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `DMC_BIND` override the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::domain::order_list::DEFAULT_PAGE_SIZE;
use crate::domain::toast::DEFAULT_TOAST_DURATION;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.yaml";
pub const CONFIG_PATH_ENV: &str = "DMC_CONFIG";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("store is set to supabase but {0} is missing")]
    MissingSupabaseSetting(&'static str),
    #[error("page_size must be at least 1")]
    InvalidPageSize,
}

/// Which storage backend the server runs on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Supabase,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub bind_address: String,
    /// Origin allowed by CORS, i.e. where the dashboard UI is served from
    pub allowed_origin: String,
    /// Directory served for every path outside `/api`
    pub static_dir: Option<PathBuf>,
    pub store: StoreKind,
    pub supabase: SupabaseConfig,
    pub toast_duration_ms: u64,
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            static_dir: None,
            store: StoreKind::default(),
            supabase: SupabaseConfig::default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION.as_millis() as u64,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DashboardConfig {
    /// Load from the configured path, apply environment overrides and validate
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Apply environment overrides through `lookup`, so tests need not touch
    /// the process environment
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUPABASE_URL") {
            self.supabase.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY") {
            self.supabase.anon_key = Some(key);
        }
        if let Some(bind) = lookup("DMC_BIND") {
            self.bind_address = bind;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if self.store == StoreKind::Supabase {
            self.supabase_credentials()?;
        }
        Ok(())
    }

    /// Supabase project URL and anon key, both required for the hosted store
    pub fn supabase_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let url = non_empty(&self.supabase.url).ok_or(ConfigError::MissingSupabaseSetting("supabase.url"))?;
        let key = non_empty(&self.supabase.anon_key)
            .ok_or(ConfigError::MissingSupabaseSetting("supabase.anon_key"))?;
        Ok((url, key))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_yaml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.allowed_origin, "http://localhost:8080");
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.toast_duration(), Duration::from_millis(3000));
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
store: supabase
supabase:
  url: https://demo.supabase.co
  anon_key: public-anon-key
toast_duration_ms: 1500
"#;
        let config = DashboardConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.store, StoreKind::Supabase);
        assert_eq!(config.toast_duration_ms, 1500);
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(
            config.supabase_credentials(),
            Ok(("https://demo.supabase.co", "public-anon-key"))
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SUPABASE_URL", "https://env.supabase.co"),
            ("SUPABASE_ANON_KEY", "env-key"),
            ("DMC_BIND", "0.0.0.0:8000"),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.supabase.url.as_deref(), Some("https://env.supabase.co"));
        assert_eq!(config.supabase.anon_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_supabase_without_credentials_is_rejected() {
        let config = DashboardConfig {
            store: StoreKind::Supabase,
            supabase: SupabaseConfig {
                url: Some("https://demo.supabase.co".to_string()),
                anon_key: Some("  ".to_string()),
            },
            ..DashboardConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingSupabaseSetting("supabase.anon_key"))
        );
    }

    #[test]
    fn test_unknown_store_fails_to_parse() {
        assert!(DashboardConfig::from_yaml_str("store: postgres").is_err());
    }
}
