//! Task Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Task, TaskUpdate};
use shared::util::now_millis;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Task>> {
    let rows = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, done, created_at, updated_at FROM task ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Task>> {
    let row = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, done, created_at, updated_at FROM task WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, title: &str, description: &str) -> RepoResult<Task> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO task (title, description, done, created_at, updated_at) VALUES (?1, ?2, 0, ?3, ?3) RETURNING id",
    )
    .bind(title)
    .bind(description)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create task".into()))
}

/// Partial update: unset fields keep their stored value
pub async fn update(pool: &SqlitePool, id: i64, data: TaskUpdate) -> RepoResult<Task> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE task SET title = COALESCE(?1, title), description = COALESCE(?2, description), done = COALESCE(?3, done), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.titulo)
    .bind(data.descripcion)
    .bind(data.completada)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "No se encontró ninguna tarea con el ID {id}"
        )));
    }
    find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::NotFound(format!("No se encontró ninguna tarea con el ID {id}"))
    })
}

/// Delete a task and return the removed row
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Task> {
    let task = find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::NotFound(format!("No se encontró ninguna tarea con el ID {id}"))
    })?;
    sqlx::query("DELETE FROM task WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory SQLite pool with the task schema applied
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let task = create(&pool, "Aprender SQL", "Estudiar bases de datos")
            .await
            .unwrap();
        assert_eq!(task.id, 1);
        assert!(!task.done);
        assert_eq!(task.created_at, task.updated_at);

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Aprender SQL");
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let pool = test_pool().await;
        let task = create(&pool, "Aprender SQL", "Estudiar bases de datos")
            .await
            .unwrap();

        let updated = update(
            &pool,
            task.id,
            TaskUpdate {
                titulo: None,
                descripcion: None,
                completada: Some(true),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Aprender SQL");
        assert_eq!(updated.description, "Estudiar bases de datos");
        assert!(updated.done);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let err = update(
            &pool,
            42,
            TaskUpdate {
                titulo: Some("Otra".into()),
                descripcion: None,
                completada: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row() {
        let pool = test_pool().await;
        let task = create(&pool, "Tarea temporal", "").await.unwrap();

        let removed = delete(&pool, task.id).await.unwrap();
        assert_eq!(removed.title, "Tarea temporal");
        assert!(find_by_id(&pool, task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let err = delete(&pool, 7).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
