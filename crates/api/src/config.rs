use folio_core::theme::Theme;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};

/// Server configuration loaded from environment variables.
///
/// All fields except the admin credentials and `JWT_SECRET` have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL URL. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Theme served before the admin has saved one (default: `dark`).
    pub default_theme: Theme,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// The single admin account.
    pub admin: AdminConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    /// | `DEFAULT_THEME`        | `dark`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let default_theme: Theme = std::env::var("DEFAULT_THEME")
            .map(|v| v.parse().expect("DEFAULT_THEME must be 'light' or 'dark'"))
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            default_theme,
            jwt: JwtConfig::from_env(),
            admin: AdminConfig::from_env(),
        }
    }
}

/// Credentials of the single dashboard admin.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Login email, stored lowercase.
    pub email: String,
    /// Argon2id PHC hash of the admin password.
    pub password_hash: String,
}

impl AdminConfig {
    /// Load the admin account from the environment.
    ///
    /// `ADMIN_PASSWORD_HASH` takes precedence. Otherwise `ADMIN_PASSWORD` is
    /// checked against the minimum length and hashed at startup.
    ///
    /// # Panics
    ///
    /// Panics if `ADMIN_EMAIL` is missing, or if neither password variable
    /// is usable.
    pub fn from_env() -> Self {
        let email = std::env::var("ADMIN_EMAIL")
            .expect("ADMIN_EMAIL must be set in the environment")
            .trim()
            .to_lowercase();
        assert!(!email.is_empty(), "ADMIN_EMAIL must not be empty");

        let password_hash = match std::env::var("ADMIN_PASSWORD_HASH") {
            Ok(hash) if !hash.trim().is_empty() => hash.trim().to_string(),
            _ => {
                let password = std::env::var("ADMIN_PASSWORD")
                    .expect("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD must be set");
                if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
                    panic!("ADMIN_PASSWORD is too weak: {msg}");
                }
                hash_password(&password).expect("Failed to hash ADMIN_PASSWORD")
            }
        };

        Self {
            email,
            password_hash,
        }
    }
}
