//! SQLite pool construction and embedded schema migrations

use crate::config::app_config::DatabaseConfig;
use crate::shared::error::AppResult;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Schema statements, applied in order at startup. All statements are
/// idempotent so restarts are safe.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS events (
        id TEXT PRIMARY KEY,
        slug TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        venue TEXT NOT NULL,
        starts_at TEXT NOT NULL,
        ends_at TEXT NOT NULL,
        capacity INTEGER NOT NULL DEFAULT 0,
        price_cents INTEGER NOT NULL DEFAULT 0,
        currency TEXT NOT NULL,
        status TEXT NOT NULL,
        banner_url TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS participants (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL REFERENCES events(id),
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        registration_code TEXT NOT NULL UNIQUE,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(event_id, email)
    )",
    "CREATE INDEX IF NOT EXISTS idx_participants_event ON participants(event_id)",
    "CREATE TABLE IF NOT EXISTS transactions (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL REFERENCES events(id),
        registrant_name TEXT NOT NULL,
        registrant_email TEXT NOT NULL,
        registrant_phone TEXT,
        amount_cents INTEGER NOT NULL,
        currency TEXT NOT NULL,
        status TEXT NOT NULL,
        gateway_invoice_id TEXT NOT NULL UNIQUE,
        checkout_url TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        expires_at TEXT NOT NULL,
        paid_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_transactions_event ON transactions(event_id)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_status ON transactions(status)",
    "CREATE TABLE IF NOT EXISTS attendance (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL REFERENCES events(id),
        participant_id TEXT NOT NULL REFERENCES participants(id),
        checked_in_at TEXT NOT NULL,
        UNIQUE(event_id, participant_id)
    )",
    "CREATE TABLE IF NOT EXISTS certificate_templates (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL UNIQUE REFERENCES events(id),
        background_url TEXT NOT NULL,
        width INTEGER NOT NULL,
        height INTEGER NOT NULL,
        placements TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS certificates (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL REFERENCES events(id),
        participant_id TEXT NOT NULL REFERENCES participants(id),
        serial TEXT NOT NULL UNIQUE,
        issued_at TEXT NOT NULL,
        UNIQUE(event_id, participant_id)
    )",
    "CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        slug TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        author TEXT NOT NULL,
        published INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS testimonials (
        id TEXT PRIMARY KEY,
        author_name TEXT NOT NULL,
        author_title TEXT,
        quote TEXT NOT NULL,
        approved INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS admin_users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_digest TEXT NOT NULL,
        salt TEXT NOT NULL,
        role TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

/// Open the pool and apply the schema
pub async fn connect(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    run_migrations(&pool).await?;

    info!("Database ready at {}", config.url);
    Ok(pool)
}

/// Apply all schema statements
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// In-memory pool for tests. A single connection keeps the database alive
/// for the pool's lifetime.
pub async fn connect_in_memory() -> AppResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
