//! Server configuration

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default request body limit (10MB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Front-end origin allowed by CORS
    pub front_url: String,
    /// Bind host
    pub http_host: String,
    /// Bind port
    pub http_port: u16,
    /// SQLite database file (created from the bundled schema if absent)
    pub database_path: PathBuf,
    /// Maximum pooled SQLite connections
    pub db_max_connections: u32,
    /// Item image store directory
    pub images_dir: PathBuf,
    /// Draft image store directory
    pub draft_images_dir: PathBuf,
    /// Request body limit, applies to image uploads
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            front_url: "http://localhost:3000".into(),
            http_host: "127.0.0.1".into(),
            http_port: 9000,
            database_path: PathBuf::from("db/mercari.sqlite3"),
            db_max_connections: 5,
            images_dir: PathBuf::from("images"),
            draft_images_dir: PathBuf::from("draft_images"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Parse an optional numeric env var, rejecting garbage instead of silently defaulting
    fn parse_var<T>(name: &str, default: T) -> Result<T, BoxError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => v
                .parse()
                .map_err(|e| format!("{name} has invalid value {v:?}: {e}").into()),
            _ => Ok(default),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();

        Ok(Self {
            front_url: std::env::var("FRONT_URL").unwrap_or(defaults.front_url),
            http_host: std::env::var("HTTP_HOST").unwrap_or(defaults.http_host),
            http_port: Self::parse_var("HTTP_PORT", defaults.http_port)?,
            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            db_max_connections: Self::parse_var(
                "DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            images_dir: std::env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.images_dir),
            draft_images_dir: std::env::var("DRAFT_IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.draft_images_dir),
            max_upload_bytes: Self::parse_var("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.front_url, "http://localhost:3000");
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.database_path, PathBuf::from("db/mercari.sqlite3"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_parse_var_missing_uses_default() {
        let port: u16 = Config::parse_var("MARKET_TEST_UNSET_PORT", 1234).unwrap();
        assert_eq!(port, 1234);
    }
}
