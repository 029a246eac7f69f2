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

/// Open the database with WAL mode, apply migrations and seed sample rows
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

/// Insert the sample tasks when the table is empty
async fn seed_if_empty(pool: &SqlitePool) -> Result<(), AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM task")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count tasks: {e}")))?;
    if count > 0 {
        return Ok(());
    }

    let samples = [
        ("Aprender Node.js", "Completar tutorial básico de Node.js"),
        ("Crear una API REST", "Hacer un CRUD completo con Express"),
        ("Aprender SQL", "Estudiar bases de datos relacionales"),
    ];
    let now = now_millis();
    for (title, description) in samples {
        sqlx::query(
            "INSERT INTO task (title, description, done, created_at, updated_at) VALUES (?1, ?2, 0, ?3, ?3)",
        )
        .bind(title)
        .bind(description)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed tasks: {e}")))?;
    }
    tracing::info!("Seeded {} sample tasks", samples.len());
    Ok(())
}
