//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` / `PORT` | `0.0.0.0` / `8001` |
//! | `DATABASE_URL` | `postgres://localhost/studygenie` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `STORE_BACKEND` | `postgres` (or `memory`) |
//! | `CORS_ORIGINS` | `*` |
//! | `MAX_UPLOAD_BYTES` | 50 MiB |
//! | `LOG_FORMAT` / `LOG_FILE` / `LOG_ANSI` | `text` / stdout / auto |
//!
//! Provider settings (`OPENAI_*`, `EMERGENT_LLM_KEY`) are read by
//! [`OpenAIConfig::from_lookup`]. Unparsable numbers fall back to defaults.

use std::str::FromStr;

use studygenie_core::defaults::{DB_MAX_CONNECTIONS, MAX_UPLOAD_BYTES, SERVER_HOST, SERVER_PORT};
use studygenie_core::{Error, Result};
use studygenie_inference::OpenAIConfig;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/studygenie";

/// Where records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local storage, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(Error::Config(format!(
                "Unknown STORE_BACKEND '{}' (expected 'postgres' or 'memory')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging output settings.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Path of a daily-rotated log file; stdout when unset.
    pub file: Option<String>,
    /// Force ANSI colors on or off.
    pub ansi: Option<bool>,
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub store_backend: StoreBackend,
    /// Allowed CORS origins; `["*"]` allows any origin.
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub openai: OpenAIConfig,
    pub log: LogConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: SERVER_HOST.to_string(),
            port: SERVER_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DB_MAX_CONNECTIONS,
            store_backend: StoreBackend::Postgres,
            cors_origins: vec!["*".to_string()],
            max_upload_bytes: MAX_UPLOAD_BYTES,
            openai: OpenAIConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let store_backend = match var("STORE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.store_backend,
        };

        let log = LogConfig {
            format: match var("LOG_FORMAT").as_deref().map(str::trim) {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            file: var("LOG_FILE"),
            ansi: var("LOG_ANSI").map(|v| v == "true" || v == "1"),
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_or(var("PORT"), defaults.port),
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or(var("DB_MAX_CONNECTIONS"), defaults.db_max_connections),
            store_backend,
            cors_origins: var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_origins),
            max_upload_bytes: parse_or(var("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes),
            openai: OpenAIConfig::from_lookup(&lookup),
            log,
        })
    }

    /// Whether every origin is allowed.
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
