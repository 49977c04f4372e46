use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Cap for the recent-entries page.
    pub entries_page_size: i64,
    /// Stored when a submission leaves `health` blank.
    pub default_health: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://journal.db".into(),
            db_max_connections: 5,
            host: "0.0.0.0".into(),
            port: 8000,
            entries_page_size: 50,
            default_health: "good".into(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parsed("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", defaults.port)?,
            entries_page_size: parsed("ENTRIES_PAGE_SIZE", defaults.entries_page_size)?,
            default_health: env::var("DEFAULT_HEALTH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.default_health),
        })
    }
}

fn parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for env var {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
