//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

use std::path::PathBuf;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use pyshop::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("PYSHOP_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Load listener configuration from environment variables.
    pub fn from_env() -> Self {
        let host = get_env_with_fallback_or("PYSHOP_HOST", "HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("PYSHOP_PORT", "PORT", 8000);
        Self { host, port }
    }

    /// `host:port` string for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// データディレクトリを取得
///
/// `PYSHOP_DATA_DIR` が未設定の場合は `~/.pyshop` を使用する。
/// ホームディレクトリが分からない場合は `None`。
pub fn data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("PYSHOP_DATA_DIR") {
        return Some(PathBuf::from(dir));
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(|home| PathBuf::from(home).join(".pyshop"))
}

/// データベースURLを取得
///
/// 優先順位: `PYSHOP_DATABASE_URL`（旧: `DATABASE_URL`）→ データディレクトリ配下の
/// `db.sqlite3` → カレントディレクトリの `db.sqlite3`。
pub fn database_url() -> String {
    if let Some(url) = get_env_with_fallback("PYSHOP_DATABASE_URL", "DATABASE_URL") {
        return url;
    }
    match data_dir() {
        Some(dir) => format!("sqlite:{}", dir.join("db.sqlite3").display()),
        None => "sqlite:db.sqlite3".to_string(),
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Output format for stdout
    pub format: LogFormat,
    /// Directory for daily rolling log files (disabled when `None`)
    pub dir: Option<PathBuf>,
}

impl LogConfig {
    /// Load logging configuration from environment variables.
    pub fn from_env() -> Self {
        let level = get_env_with_fallback_or("PYSHOP_LOG_LEVEL", "LOG_LEVEL", "info");
        let format = match get_env_with_fallback("PYSHOP_LOG_FORMAT", "LOG_FORMAT")
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let dir = std::env::var("PYSHOP_LOG_DIR").ok().map(PathBuf::from);
        Self { level, format, dir }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            dir: None,
        }
    }
}
