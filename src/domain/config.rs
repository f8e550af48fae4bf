//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Secrets usually arrive through the environment; those overrides are applied after the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::types::AdminPolicy;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,
}

impl ServerConfig {
    /// Route paths must start with `/`; a bare `hook` becomes `/hook`.
    pub fn normalize(&mut self) {
        let trimmed = self.webhook_path.trim();
        self.webhook_path = if trimmed.is_empty() {
            default_webhook_path()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            webhook_path: default_webhook_path(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}
fn default_webhook_path() -> String {
    "/api/webhook".to_string()
}

/// Telegram Bot API settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_env: Option<String>, // e.g. "MY_BOT_TOKEN"
    #[serde(default = "default_telegram_api")]
    pub api_base: String,
    /// This bot's username. Group commands addressed to a different bot are ignored.
    #[serde(default)]
    pub bot_username: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env: None,
            api_base: default_telegram_api(),
            bot_username: None,
        }
    }
}

fn default_telegram_api() -> String {
    "https://api.telegram.org".to_string()
}

/// Airtable table holding the payment records.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub base_id: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default = "default_view")]
    pub view: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_airtable_api")]
    pub api_base: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: None,
            base_id: None,
            table_name: None,
            view: default_view(),
            page_size: default_page_size(),
            api_base: default_airtable_api(),
        }
    }
}

fn default_view() -> String {
    "Grid view".to_string()
}
fn default_page_size() -> u32 {
    50
}
fn default_airtable_api() -> String {
    "https://api.airtable.com/v0".to_string()
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct AdminConfig {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub policy: AdminPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
        }
    }
}

fn default_window_ms() -> u64 {
    5000
}
fn default_max_requests() -> u32 {
    3
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Optional log file, written in addition to stdout.
    #[serde(default)]
    pub file: Option<String>,
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default)]
    pub filter: Option<String>,
}

impl AppConfig {
    /// Reads the YAML file if present, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.server.normalize();
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Fills secrets and addressing from the environment. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = self.telegram.token_env.as_deref().and_then(&get) {
            self.telegram.token = Some(token);
        }
        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = Some(token);
        }
        if let Some(username) = get("TELEGRAM_BOT_USERNAME") {
            self.telegram.bot_username = Some(username);
        }

        if let Some(key) = self.store.api_key_env.as_deref().and_then(&get) {
            self.store.api_key = Some(key);
        }
        if let Some(key) = get("AIRTABLE_API_KEY") {
            self.store.api_key = Some(key);
        }
        if let Some(base) = get("AIRTABLE_BASE_ID") {
            self.store.base_id = Some(base);
        }
        if let Some(table) = get("AIRTABLE_TABLE_NAME") {
            self.store.table_name = Some(table);
        }

        if let Some(ids) = get("ADMIN_IDS") {
            self.admin.ids = ids
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(&temp_dir.path().join("config.yaml")).unwrap();

        assert_eq!(config.rate_limit.window_ms, 5000);
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.store.page_size, 50);
        assert_eq!(config.store.view, "Grid view");
        assert_eq!(config.admin.policy, AdminPolicy::OpenIfEmpty);
    }

    #[test]
    fn test_load_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(
            &path,
            concat!(
                "server:\n",
                "  bind: 127.0.0.1:8080\n",
                "store:\n",
                "  base_id: appXYZ\n",
                "  table_name: Payments\n",
                "admin:\n",
                "  ids: ['111', '222']\n",
                "  policy: strict\n",
                "rate_limit:\n",
                "  max_requests: 5\n",
            ),
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.webhook_path, "/api/webhook");
        assert_eq!(config.store.base_id.as_deref(), Some("appXYZ"));
        assert_eq!(config.admin.ids, vec!["111", "222"]);
        assert_eq!(config.admin.policy, AdminPolicy::Strict);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_ms, 5000);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "rate_limit: [not, a, map]").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("AIRTABLE_API_KEY", "key1"),
            ("AIRTABLE_BASE_ID", "app1"),
            ("AIRTABLE_TABLE_NAME", "  "),
            ("ADMIN_IDS", " 42, ,7 "),
            ("TELEGRAM_BOT_USERNAME", "PayBot"),
        ]);
        let mut config = AppConfig::from_yaml("store:\n  table_name: Payments\n").unwrap();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.telegram.token.as_deref(), Some("123:abc"));
        assert_eq!(config.store.api_key.as_deref(), Some("key1"));
        assert_eq!(config.store.base_id.as_deref(), Some("app1"));
        // Blank env value keeps the file value
        assert_eq!(config.store.table_name.as_deref(), Some("Payments"));
        assert_eq!(config.admin.ids, vec!["42", "7"]);
        assert_eq!(config.telegram.bot_username.as_deref(), Some("PayBot"));
    }

    #[test]
    fn test_webhook_path_gets_leading_slash() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server:\n  webhook_path: hook\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.webhook_path, "/hook");
    }

    #[test]
    fn test_normalize_webhook_path() {
        for (raw, expected) in [
            ("/api/webhook", "/api/webhook"),
            ("telegram/updates", "/telegram/updates"),
            ("  /padded ", "/padded"),
            ("", "/api/webhook"),
        ] {
            let mut server = ServerConfig {
                webhook_path: raw.to_string(),
                ..ServerConfig::default()
            };
            server.normalize();
            assert_eq!(server.webhook_path, expected, "input {:?}", raw);
        }
    }

    #[test]
    fn test_custom_env_var_names() {
        let env: HashMap<&str, &str> =
            HashMap::from([("MY_TOKEN", "t"), ("MY_AIRTABLE", "k")]);
        let mut config = AppConfig::from_yaml(
            "telegram:\n  token_env: MY_TOKEN\nstore:\n  api_key_env: MY_AIRTABLE\n",
        )
        .unwrap();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.telegram.token.as_deref(), Some("t"));
        assert_eq!(config.store.api_key.as_deref(), Some("k"));
    }
}
