use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create the entries table if it does not exist yet (idempotent, run on every startup).
pub async fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS entries (
               id          INTEGER PRIMARY KEY AUTOINCREMENT,
               created_at  TEXT    NOT NULL,
               entry_date  TEXT    NOT NULL,
               reading     BOOLEAN NOT NULL DEFAULT 0,
               exercise    BOOLEAN NOT NULL DEFAULT 0,
               no_meat     INTEGER NOT NULL DEFAULT 0,
               flossing    BOOLEAN NOT NULL DEFAULT 0,
               health      TEXT    NOT NULL DEFAULT '',
               notes       TEXT    NOT NULL DEFAULT ''
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_entry_date ON entries (entry_date)")
        .execute(pool)
        .await?;
    Ok(())
}

/// Single-connection in-memory pool with the schema applied.
/// An in-memory SQLite database lives only as long as its connection,
/// so the pool must never open a second one.
pub async fn memory_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
