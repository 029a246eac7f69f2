//! Dish Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Dish, DishUpdate};
use shared::util::now_millis;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Dish>> {
    let rows = sqlx::query_as::<_, Dish>(
        "SELECT id, name, price, description, category_id, created_at, updated_at FROM dish ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dish>> {
    let row = sqlx::query_as::<_, Dish>(
        "SELECT id, name, price, description, category_id, created_at, updated_at FROM dish WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    price: f64,
    description: &str,
    category_id: Option<i64>,
) -> RepoResult<Dish> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO dish (name, price, description, category_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(description)
    .bind(category_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dish".into()))
}

/// Partial update: unset fields keep their stored value
pub async fn update(pool: &SqlitePool, id: i64, data: DishUpdate) -> RepoResult<Dish> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE dish SET name = COALESCE(?1, name), price = COALESCE(?2, price), description = COALESCE(?3, description), category_id = COALESCE(?4, category_id), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.nombre)
    .bind(data.precio)
    .bind(data.descripcion)
    .bind(data.categoria_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "No se encontró ningún plato con el ID {id}"
        )));
    }
    find_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::NotFound(format!("No se encontró ningún plato con el ID {id}"))
    })
}

/// Delete a dish and return the removed row.
///
/// Order lines referencing it keep their price snapshot; nothing blocks
/// the deletion.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Dish> {
    let dish = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("No existe un plato con el ID {id}")))?;
    sqlx::query("DELETE FROM dish WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(dish)
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn test_create_and_list_ordered_by_id() {
        let pool = test_pool().await;
        create(&pool, "Sancocho", 18000.0, "Sopa tradicional", None)
            .await
            .unwrap();
        create(&pool, "Arepa con queso", 8000.0, "", None)
            .await
            .unwrap();

        let dishes = find_all(&pool).await.unwrap();
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].name, "Sancocho");
        assert_eq!(dishes[1].id, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let pool = test_pool().await;
        let dish = create(&pool, "Sancocho", 18000.0, "Sopa tradicional", None)
            .await
            .unwrap();

        let updated = update(
            &pool,
            dish.id,
            DishUpdate {
                nombre: None,
                precio: Some(19500.0),
                descripcion: None,
                categoria_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Sancocho");
        assert_eq!(updated.price, 19500.0);
        assert_eq!(updated.description, "Sopa tradicional");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let err = update(
            &pool,
            42,
            DishUpdate {
                nombre: Some("Otro".into()),
                precio: None,
                descripcion: None,
                categoria_id: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row() {
        let pool = test_pool().await;
        let dish = create(&pool, "Sancocho", 18000.0, "", None).await.unwrap();

        let removed = delete(&pool, dish.id).await.unwrap();
        assert_eq!(removed.name, "Sancocho");
        assert!(find_by_id(&pool, dish.id).await.unwrap().is_none());

        let err = delete(&pool, dish.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
