use crate::error::{AdminError, AdminResult};

/// Default connection pool size. Batches run sequentially, so a small pool suffices.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Admin tool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum pooled connections (default: `5`).
    pub max_connections: u32,
    /// Apply pending migrations on startup (default: `false`).
    pub run_migrations: bool,
}

impl AdminConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default    |
    /// |----------------------|------------|
    /// | `DATABASE_URL`       | (required) |
    /// | `DB_MAX_CONNECTIONS` | `5`        |
    /// | `RUN_MIGRATIONS`     | `false`    |
    pub fn from_env() -> AdminResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AdminResult<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AdminError::Config("DATABASE_URL must be set".into()))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                AdminError::Config(format!(
                    "DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AdminError::Config(format!("RUN_MIGRATIONS must be true or false, got '{raw}'"))
            })?,
            None => false,
        };

        Ok(Self {
            database_url,
            max_connections,
            run_migrations,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
