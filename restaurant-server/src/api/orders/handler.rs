//! Order API Handlers
//!
//! Input checks (customer present, at least one item, known status) run
//! here; dish existence and all writes happen inside one repository
//! transaction, so a rejected order never leaves partial rows.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::json;

use crate::db::models::{
    ItemsPayload, Order, OrderCreate, OrderDetail, OrderItemInput, OrderItemPayload, OrderStatus,
    OrderUpdate,
};
use crate::db::repository::order as order_repo;
use crate::state::AppState;
use shared::extract::Path;
use shared::response::ApiResponse;
use shared::{AppError, AppResult};

/// GET /api/ordenes - order headers, newest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = order_repo::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::ok_with_message(orders, "Órdenes obtenidas")))
}

/// GET /api/ordenes/:id - order with its line items
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = order_repo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Orden no encontrada"))?;
    Ok(Json(ApiResponse::ok_with_message(detail, "Orden encontrada")))
}

/// POST /api/ordenes - place an order
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderDetail>>)> {
    let cliente = payload
        .cliente
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("El nombre del cliente es obligatorio"))?;

    let items = payload.items.map(ItemsPayload::into_vec).unwrap_or_default();
    if items.is_empty() {
        return Err(AppError::validation("La orden debe tener al menos un ítem"));
    }
    let items = resolve_items(items, "Algunos platos no existen")?;

    let detail =
        order_repo::create(&state.pool, &cliente, payload.mesa.as_deref(), &items).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(detail, "Orden creada correctamente")),
    ))
}

/// PUT /api/ordenes/:id - full replacement of the order
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let cliente = payload
        .cliente
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("El cliente es obligatorio"))?;

    // Unlike creation, only a real list of items is accepted here
    let items = match payload.items {
        Some(ItemsPayload::Many(items)) if !items.is_empty() => items,
        _ => return Err(AppError::validation("La orden debe tener ítems")),
    };
    let items = resolve_items(items, "Uno o más platos no existen")?;

    let estado = match payload.estado.as_deref() {
        Some(value) => Some(
            OrderStatus::parse(value).ok_or_else(|| AppError::validation("Estado inválido"))?,
        ),
        None => None,
    };

    let detail = order_repo::update(
        &state.pool,
        id,
        &cliente,
        payload.mesa.as_deref(),
        estado,
        &items,
    )
    .await?;
    Ok(Json(ApiResponse::ok_with_message(
        detail,
        "Orden actualizada correctamente",
    )))
}

/// DELETE /api/ordenes/:id - remove the order and its lines
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    order_repo::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        json!({ "id": id }),
        "Orden eliminada correctamente",
    )))
}

/// Client items to validated inputs. A line without `plato_id` can never
/// match a dish, so it gets the same rejection as an unknown id.
fn resolve_items(
    items: Vec<OrderItemPayload>,
    missing_msg: &str,
) -> AppResult<Vec<OrderItemInput>> {
    items
        .into_iter()
        .map(|item| {
            let dish_id = item
                .dish_id
                .ok_or_else(|| AppError::validation(missing_msg))?;
            Ok(OrderItemInput {
                dish_id,
                quantity: item.quantity,
            })
        })
        .collect()
}
