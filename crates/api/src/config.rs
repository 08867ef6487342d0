use std::path::PathBuf;
use std::str::FromStr;

use grindtracker_core::bonus::{
    BonusConfig, DEFAULT_BATTLE_MINUTES, DEFAULT_MAX_RECENT_BATTLES, DEFAULT_PREMIUM_MULTIPLIER,
    DEFAULT_RP_PER_GOLDEN_EAGLE,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Catalog document loaded at startup. Unset means an empty catalog
    /// until an admin import.
    pub catalog_path: Option<PathBuf>,
    /// Bonus model constants injected into every estimate.
    pub bonus: BonusConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `CATALOG_PATH`           | unset                      |
    /// | `PREMIUM_RP_MULTIPLIER`  | `2.0`                      |
    /// | `RP_PER_GOLDEN_EAGLE`    | `45`                       |
    /// | `DEFAULT_BATTLE_MINUTES` | `9.0`                      |
    /// | `MAX_RECENT_BATTLES`     | `5`                        |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);

        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let bonus = BonusConfig {
            premium_multiplier: env_or("PREMIUM_RP_MULTIPLIER", DEFAULT_PREMIUM_MULTIPLIER),
            rp_per_golden_eagle: env_or("RP_PER_GOLDEN_EAGLE", DEFAULT_RP_PER_GOLDEN_EAGLE),
            default_battle_minutes: env_or("DEFAULT_BATTLE_MINUTES", DEFAULT_BATTLE_MINUTES),
            max_recent_battles: env_or("MAX_RECENT_BATTLES", DEFAULT_MAX_RECENT_BATTLES),
        };
        if let Err(e) = bonus.validate() {
            panic!("Invalid bonus configuration: {e}");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            catalog_path,
            bonus,
        }
    }
}

/// Read and parse `name`, falling back to `default` when unset.
fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid value: {e}")),
        Err(_) => default,
    }
}
