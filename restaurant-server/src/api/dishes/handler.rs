//! Dish API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::db::models::{Dish, DishCreate, DishUpdate};
use crate::db::repository::{category as category_repo, dish as dish_repo};
use crate::state::AppState;
use shared::extract::Path;
use shared::response::ApiResponse;
use shared::{AppError, AppResult};

/// GET /api/platos - full menu
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Dish>>>> {
    let dishes = dish_repo::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::list(dishes)))
}

/// GET /api/platos/:id - single dish
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Dish>>> {
    let dish = dish_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No se encontró ningún plato con el ID {id}")))?;
    Ok(Json(ApiResponse::ok(dish)))
}

/// POST /api/platos - add a dish to the menu
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DishCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Dish>>)> {
    let nombre = payload
        .nombre
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("El nombre del plato es obligatorio"))?;
    let precio = payload
        .precio
        .ok_or_else(|| AppError::validation("El precio es obligatorio y debe ser un número"))?;
    let descripcion = payload.descripcion.unwrap_or_default();

    if let Some(categoria_id) = payload.categoria_id {
        if !category_repo::exists(&state.pool, categoria_id).await? {
            return Err(AppError::validation("La categoría no existe"));
        }
    }

    let dish = dish_repo::create(
        &state.pool,
        &nombre,
        precio,
        &descripcion,
        payload.categoria_id,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(dish, "Plato creado exitosamente")),
    ))
}

/// PUT /api/platos/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishUpdate>,
) -> AppResult<Json<ApiResponse<Dish>>> {
    // Unknown id wins over an empty payload
    dish_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No se encontró ningún plato con el ID {id}")))?;

    if payload.is_empty() {
        return Err(AppError::validation("No se enviaron campos para actualizar"));
    }
    if let Some(categoria_id) = payload.categoria_id {
        if !category_repo::exists(&state.pool, categoria_id).await? {
            return Err(AppError::validation("La categoría no existe"));
        }
    }

    let dish = dish_repo::update(&state.pool, id, payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        dish,
        "Plato actualizado exitosamente",
    )))
}

/// DELETE /api/platos/:id - remove from the menu, return the removed row
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Dish>>> {
    let dish = dish_repo::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        dish,
        "Plato eliminado exitosamente",
    )))
}
