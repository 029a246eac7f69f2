//! Category API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::db::models::{Category, CategoryPayload};
use crate::db::repository::category as category_repo;
use crate::state::AppState;
use shared::extract::Path;
use shared::response::ApiResponse;
use shared::{AppError, AppResult};

/// GET /api/categorias - every category
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = category_repo::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::ok_with_message(
        categories,
        "Categorías obtenidas",
    )))
}

/// GET /api/categorias/:id - single category
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = category_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Categoría no encontrada"))?;
    Ok(Json(ApiResponse::ok_with_message(
        category,
        "Categoría encontrada",
    )))
}

/// POST /api/categorias - add a category
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let nombre = payload
        .nombre
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("El campo nombre es requerido"))?;

    let category =
        category_repo::create(&state.pool, &nombre, payload.descripcion.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(category, "Categoría creada")),
    ))
}

/// PUT /api/categorias/:id - full replacement
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<ApiResponse<Category>>> {
    // Name is checked before the row is looked up
    let nombre = payload
        .nombre
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("El campo nombre es requerido"))?;

    let category =
        category_repo::update(&state.pool, id, &nombre, payload.descripcion.as_deref()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        category,
        "Categoría actualizada",
    )))
}

/// DELETE /api/categorias/:id - refused while dishes still point at it
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Value>>> {
    category_repo::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        json!({ "id": id }),
        "Categoría eliminada",
    )))
}
