//! Database Module
//!
//! Handles the SQLite connection pool, migrations and first-boot seeding

pub mod models;
pub mod repository;

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use shared::error::AppError;
use shared::util::now_millis;

/// Open the database with WAL mode, apply migrations and seed sample dishes
pub async fn connect(db_path: &str) -> Result<SqlitePool, AppError> {
    // The default path lives under database/, which may not exist yet
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
    }

    // Build connection options: WAL, foreign keys, normal sync
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
        .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .pragma("foreign_keys", "ON");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    // busy_timeout: wait up to 5s on write contention instead of failing
    sqlx::query("PRAGMA busy_timeout = 5000;")
        .execute(&pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

    tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

    // Run migrations (ignore previously applied but now removed migrations)
    sqlx::migrate!("./migrations")
        .set_ignore_missing(true)
        .run(&pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
    tracing::info!("Database migrations applied");

    seed_if_empty(&pool).await?;

    Ok(pool)
}

/// Insert the sample dishes when the menu is empty
async fn seed_if_empty(pool: &SqlitePool) -> Result<(), AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dish")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count dishes: {e}")))?;
    if count > 0 {
        return Ok(());
    }

    let samples = [
        ("Bandeja paisa", 25000.0, "Plato típico colombiano"),
        ("Sancocho", 18000.0, "Sopa tradicional"),
        ("Arepa con queso", 8000.0, "Arepa asada con queso"),
    ];
    let now = now_millis();
    for (name, price, description) in samples {
        sqlx::query(
            "INSERT INTO dish (name, price, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed dishes: {e}")))?;
    }
    tracing::info!("Seeded {} sample dishes", samples.len());
    Ok(())
}
