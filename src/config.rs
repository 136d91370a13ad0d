/*
 * Responsibility
 * - read environment (DATABASE_URL, JWT_SECRET, ROLE_ADMIN, CORS allowlist ...)
 * - validate values; anything missing or malformed aborts startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::PermissionMask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,
    pub request_timeout_seconds: u64,

    // HS256 shared secret; never printed
    pub jwt_secret: String,
    // 0 = tokens carry no `exp`
    pub access_token_ttl_seconds: u64,
    pub access_token_leeway_seconds: u64,

    pub role_admin: PermissionMask,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("role_admin", &self.role_admin)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or("PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 10)?;

        let cors_allowed_origins = split_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
        );
        let request_timeout_seconds = parse_or("REQUEST_TIMEOUT_SECONDS", 30)?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let access_token_ttl_seconds = parse_or("ACCESS_TOKEN_TTL_SECONDS", 3600)?;
        let access_token_leeway_seconds = parse_or("ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        let role_admin = match std::env::var("ROLE_ADMIN") {
            Ok(raw) => raw
                .trim()
                .parse::<PermissionMask>()
                .map_err(|_| ConfigError::Invalid("ROLE_ADMIN"))?,
            Err(_) => PermissionMask::new(1),
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            request_timeout_seconds,
            jwt_secret,
            access_token_ttl_seconds,
            access_token_leeway_seconds,
            role_admin,
        })
    }
}

/// Unset falls back to `default`; set-but-unparsable is an error.
fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
