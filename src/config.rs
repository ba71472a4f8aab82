//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. Values may be seeded from a `.env` file in the
//! working directory; real environment variables always win.

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::fmt;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: String,
    /// Host address to bind to
    pub host: String,
}

/// Database configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Database server host
    pub host: String,
    /// Database server port
    pub port: u16,
    /// Login role
    pub user: String,
    /// Login password (never printed)
    pub password: String,
    /// Database name
    pub name: String,
    /// Upper bound for pooled connections
    pub max_connections: u32,
    /// Apply the bundled schema on startup
    pub auto_migrate: bool,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("auto_migrate", &self.auto_migrate)
            .finish()
    }
}

impl Config {
    /// Load `.env` (if present) and then read configuration from the environment
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Failed to load .env file: {}", e),
        }
        Self::from_env()
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: var_or("SER_PORT", "8088"),
                host: var_or("SER_HOST", "0.0.0.0"),
            },
            database: DatabaseConfig {
                host: var_or("DB_HOST", "postgres"),
                port: var("DB_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5432),
                user: var_or("DB_USER", "postgres"),
                password: var_or("DB_PASS", "password"),
                name: var_or("DB_NAME", "postgres"),
                max_connections: var("DB_MAX_CONNECTIONS")
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(10),
                auto_migrate: var("DB_AUTO_MIGRATE")
                    .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(false),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    /// Typed connection options; credentials are passed verbatim, never URL-encoded
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }

    /// Connection URL for logs, with the password masked
    pub fn display_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}?sslmode=disable",
            self.user, self.host, self.port, self.name
        )
    }
}

/// Read a variable, treating empty values as unset
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| default.to_string())
}
