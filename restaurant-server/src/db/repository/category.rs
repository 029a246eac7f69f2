//! Category Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::Category;
use shared::util::now_millis;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at, updated_at FROM category",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let row = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at, updated_at FROM category WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
) -> RepoResult<Category> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO category (name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?3) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Full replacement: `description` is cleared when not supplied
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    description: Option<&str>,
) -> RepoResult<Category> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE category SET name = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(name)
    .bind(description)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound("Categoría no encontrada".into()));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound("Categoría no encontrada".into()))
}

/// Delete a category unless dishes still reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let dishes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dish WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if dishes > 0 {
        return Err(RepoError::Validation(
            "No se puede eliminar la categoría: tiene platos asociados".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound("Categoría no encontrada".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::dish;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory SQLite pool with the restaurant schema applied
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
    async fn test_create_and_exists() {
        let pool = test_pool().await;
        let category = create(&pool, "Sopas", Some("Platos de cuchara"))
            .await
            .unwrap();
        assert_eq!(category.name, "Sopas");
        assert!(exists(&pool, category.id).await.unwrap());
        assert!(!exists(&pool, 99).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_clears_missing_description() {
        let pool = test_pool().await;
        let category = create(&pool, "Sopas", Some("Platos de cuchara"))
            .await
            .unwrap();

        let updated = update(&pool, category.id, "Sopas y caldos", None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Sopas y caldos");
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_delete_blocked_while_dishes_reference_it() {
        let pool = test_pool().await;
        let category = create(&pool, "Sopas", None).await.unwrap();
        dish::create(&pool, "Sancocho", 18000.0, "", Some(category.id))
            .await
            .unwrap();

        let err = delete(&pool, category.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(exists(&pool, category.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let err = delete(&pool, 7).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
