//! Order Repository
//!
//! Create, update and delete touch both the `orders` header and the
//! `order_item` lines, so each runs inside a transaction; an error on
//! any step rolls the whole write back. Line items snapshot the dish
//! price at write time (`unit_price`), which later menu edits and dish
//! deletions never touch.

use std::collections::HashMap;

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Order, OrderDetail, OrderItemDetail, OrderItemInput, OrderStatus};
use shared::util::now_millis;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(
        "SELECT id, customer, table_label, status, total, created_at, updated_at FROM orders ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Order header plus its lines, joined to today's menu for
/// `dish_name`/`current_price` (both null when the dish is gone)
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, customer, table_label, status, total, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    let Some(order) = order else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.id, oi.order_id, oi.dish_id, oi.quantity, oi.unit_price, oi.subtotal, d.name AS dish_name, d.price AS current_price FROM order_item oi LEFT JOIN dish d ON oi.dish_id = d.id WHERE oi.order_id = ?",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(OrderDetail { order, items }))
}

/// Create an order: validate dishes, insert header + lines, persist the
/// accumulated total, all in one transaction
pub async fn create(
    pool: &SqlitePool,
    customer: &str,
    table_label: Option<&str>,
    items: &[OrderItemInput],
) -> RepoResult<OrderDetail> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    // Existence check before any insert: a bad dish id must leave zero rows
    let Some(prices) = find_dish_prices(&mut tx, items).await? else {
        return Err(RepoError::Validation("Algunos platos no existen".into()));
    };

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (customer, table_label, status, total, created_at, updated_at) VALUES (?1, ?2, ?3, 0, ?4, ?4) RETURNING id",
    )
    .bind(customer)
    .bind(table_label)
    .bind(OrderStatus::Pendiente)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let total = replace_items(&mut tx, id, items, &prices).await?;

    sqlx::query("UPDATE orders SET total = ? WHERE id = ?")
        .bind(total)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    find_detail(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to load created order".into()))
}

/// Replace an order wholesale: header fields, the full line-item set and
/// the recomputed total. `status = None` keeps the stored status.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    customer: &str,
    table_label: Option<&str>,
    status: Option<OrderStatus>,
    items: &[OrderItemInput],
) -> RepoResult<OrderDetail> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, Order>(
        "SELECT id, customer, table_label, status, total, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound("Orden no encontrada".into()))?;

    let Some(prices) = find_dish_prices(&mut tx, items).await? else {
        return Err(RepoError::Validation("Uno o más platos no existen".into()));
    };

    let status = status.unwrap_or(current.status);
    sqlx::query(
        "UPDATE orders SET customer = ?1, table_label = ?2, status = ?3, updated_at = ?4 WHERE id = ?5",
    )
    .bind(customer)
    .bind(table_label)
    .bind(status)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let total = replace_items(&mut tx, id, items, &prices).await?;

    sqlx::query("UPDATE orders SET total = ? WHERE id = ?")
        .bind(total)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    find_detail(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to load updated order".into()))
}

/// Delete an order and its lines
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM order_item WHERE order_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound("Orden no encontrada".into()));
    }

    tx.commit().await?;
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────

/// Price per distinct referenced dish, or `None` when any id is unknown.
///
/// Duplicate ids in the item list are fine; existence is checked over
/// the distinct set.
async fn find_dish_prices(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    items: &[OrderItemInput],
) -> Result<Option<HashMap<i64, f64>>, sqlx::Error> {
    let mut ids: Vec<i64> = items.iter().map(|i| i.dish_id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(Some(HashMap::new()));
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT id, price FROM dish WHERE id IN ({placeholders})");
    let mut query = sqlx::query_as::<_, (i64, f64)>(&sql);
    for id in &ids {
        query = query.bind(*id);
    }
    let rows = query.fetch_all(&mut **tx).await?;

    if rows.len() != ids.len() {
        return Ok(None);
    }
    Ok(Some(rows.into_iter().collect()))
}

/// Delete the order's lines and insert the replacement set.
///
/// Returns the accumulated total. Quantity below 1 or absent counts as 1;
/// `prices` must cover every referenced dish.
async fn replace_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order_id: i64,
    items: &[OrderItemInput],
    prices: &HashMap<i64, f64>,
) -> RepoResult<f64> {
    sqlx::query("DELETE FROM order_item WHERE order_id = ?")
        .bind(order_id)
        .execute(&mut **tx)
        .await?;

    let mut total = 0.0;
    for item in items {
        let quantity = item.quantity.filter(|q| *q >= 1).unwrap_or(1);
        let unit_price = *prices.get(&item.dish_id).ok_or_else(|| {
            RepoError::Database(format!("Missing price for dish {}", item.dish_id))
        })?;
        let subtotal = unit_price * quantity as f64;

        sqlx::query(
            "INSERT INTO order_item (order_id, dish_id, quantity, unit_price, subtotal) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(order_id)
        .bind(item.dish_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(subtotal)
        .execute(&mut **tx)
        .await?;

        total += subtotal;
    }
    Ok(total)
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

    /// Bandeja paisa (25000) and Arepa con queso (8000)
    async fn seed_dishes(pool: &SqlitePool) -> (i64, i64) {
        let bandeja = dish::create(pool, "Bandeja paisa", 25000.0, "Plato típico", None)
            .await
            .unwrap();
        let arepa = dish::create(pool, "Arepa con queso", 8000.0, "", None)
            .await
            .unwrap();
        (bandeja.id, arepa.id)
    }

    fn item(dish_id: i64, quantity: Option<i64>) -> OrderItemInput {
        OrderItemInput { dish_id, quantity }
    }

    async fn table_counts(pool: &SqlitePool) -> (i64, i64) {
        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item")
            .fetch_one(pool)
            .await
            .unwrap();
        (orders, items)
    }

    #[tokio::test]
    async fn test_create_totals_sum_of_subtotals() {
        let pool = test_pool().await;
        let (bandeja, arepa) = seed_dishes(&pool).await;

        let detail = create(
            &pool,
            "Ana",
            Some("mesa 4"),
            &[item(bandeja, Some(2)), item(arepa, None)],
        )
        .await
        .unwrap();

        assert_eq!(detail.order.status, OrderStatus::Pendiente);
        assert_eq!(detail.order.table_label.as_deref(), Some("mesa 4"));
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[1].quantity, 1);
        let sum: f64 = detail.items.iter().map(|i| i.subtotal).sum();
        assert_eq!(detail.order.total, sum);
        assert_eq!(detail.order.total, 58000.0);
    }

    #[tokio::test]
    async fn test_create_clamps_invalid_quantity() {
        let pool = test_pool().await;
        let (_, arepa) = seed_dishes(&pool).await;

        let detail = create(&pool, "Ana", None, &[item(arepa, Some(-2))])
            .await
            .unwrap();
        assert_eq!(detail.items[0].quantity, 1);
        assert_eq!(detail.order.total, 8000.0);
    }

    #[tokio::test]
    async fn test_create_accepts_duplicate_dish_ids() {
        let pool = test_pool().await;
        let (_, arepa) = seed_dishes(&pool).await;

        let detail = create(
            &pool,
            "Ana",
            None,
            &[item(arepa, Some(2)), item(arepa, Some(1))],
        )
        .await
        .unwrap();
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.order.total, 24000.0);
    }

    #[tokio::test]
    async fn test_create_unknown_dish_leaves_no_rows() {
        let pool = test_pool().await;
        let (bandeja, _) = seed_dishes(&pool).await;

        let err = create(
            &pool,
            "Ana",
            None,
            &[item(bandeja, Some(1)), item(999, Some(1))],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(table_counts(&pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_update_replaces_items_and_keeps_status() {
        let pool = test_pool().await;
        let (bandeja, arepa) = seed_dishes(&pool).await;
        let created = create(&pool, "Ana", None, &[item(bandeja, Some(2))])
            .await
            .unwrap();

        let updated = update(
            &pool,
            created.order.id,
            "Ana María",
            Some("mesa 1"),
            None,
            &[item(arepa, Some(3))],
        )
        .await
        .unwrap();

        assert_eq!(updated.order.customer, "Ana María");
        assert_eq!(updated.order.status, OrderStatus::Pendiente);
        assert_eq!(updated.order.total, 24000.0);
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].dish_id, arepa);
        // No stale lines survive the replacement
        assert_eq!(table_counts(&pool).await, (1, 1));
    }

    #[tokio::test]
    async fn test_update_sets_status() {
        let pool = test_pool().await;
        let (bandeja, _) = seed_dishes(&pool).await;
        let created = create(&pool, "Ana", None, &[item(bandeja, Some(1))])
            .await
            .unwrap();

        let updated = update(
            &pool,
            created.order.id,
            "Ana",
            None,
            Some(OrderStatus::Listo),
            &[item(bandeja, Some(1))],
        )
        .await
        .unwrap();
        assert_eq!(updated.order.status, OrderStatus::Listo);
    }

    #[tokio::test]
    async fn test_update_unknown_dish_keeps_previous_items() {
        let pool = test_pool().await;
        let (bandeja, _) = seed_dishes(&pool).await;
        let created = create(&pool, "Ana", None, &[item(bandeja, Some(2))])
            .await
            .unwrap();

        let err = update(
            &pool,
            created.order.id,
            "Ana",
            None,
            None,
            &[item(999, Some(1))],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        // The failed update rolled back; the order is untouched
        let detail = find_detail(&pool, created.order.id).await.unwrap().unwrap();
        assert_eq!(detail.order.customer, "Ana");
        assert_eq!(detail.order.total, 50000.0);
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].dish_id, bandeja);
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let pool = test_pool().await;
        let (bandeja, _) = seed_dishes(&pool).await;

        let err = update(&pool, 99, "Ana", None, None, &[item(bandeja, Some(1))])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_order_and_items() {
        let pool = test_pool().await;
        let (bandeja, arepa) = seed_dishes(&pool).await;
        let created = create(
            &pool,
            "Ana",
            None,
            &[item(bandeja, Some(1)), item(arepa, Some(2))],
        )
        .await
        .unwrap();

        delete(&pool, created.order.id).await.unwrap();
        assert!(find_detail(&pool, created.order.id).await.unwrap().is_none());
        assert_eq!(table_counts(&pool).await, (0, 0));

        let err = delete(&pool, created.order.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_deleted_dish_keeps_snapshot_in_detail() {
        let pool = test_pool().await;
        let (_, arepa) = seed_dishes(&pool).await;
        let created = create(&pool, "Ana", None, &[item(arepa, Some(2))])
            .await
            .unwrap();

        dish::delete(&pool, arepa).await.unwrap();

        let detail = find_detail(&pool, created.order.id).await.unwrap().unwrap();
        assert_eq!(detail.items[0].dish_name, None);
        assert_eq!(detail.items[0].current_price, None);
        assert_eq!(detail.items[0].unit_price, 8000.0);
        assert_eq!(detail.order.total, 16000.0);
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let pool = test_pool().await;
        let (bandeja, _) = seed_dishes(&pool).await;
        let first = create(&pool, "Ana", None, &[item(bandeja, Some(1))])
            .await
            .unwrap();
        let second = create(&pool, "Luis", None, &[item(bandeja, Some(1))])
            .await
            .unwrap();

        // Force distinct creation times; both may land in the same millisecond
        sqlx::query("UPDATE orders SET created_at = ? WHERE id = ?")
            .bind(1000_i64)
            .bind(first.order.id)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("UPDATE orders SET created_at = ? WHERE id = ?")
            .bind(2000_i64)
            .bind(second.order.id)
            .execute(&pool)
            .await
            .unwrap();

        let orders = find_all(&pool).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].customer, "Luis");
        assert_eq!(orders[1].customer, "Ana");
    }
}
