//! Task API Handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::Path;
use crate::state::AppState;
use crate::store::Task;
use shared::validation::title_length_ok;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub completada: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaskCreate {
    pub titulo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaskUpdate {
    pub titulo: Option<String>,
    pub completada: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub pagina: i64,
    pub limite: i64,
    pub total: i64,
    #[serde(rename = "totalPaginas")]
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct TaskPage {
    pub data: Vec<Task>,
    pub pagination: Pagination,
}

/// GET /api/tareas - filter by completion flag, then paginate
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<TaskPage> {
    // Zero or negative values fall back to the defaults
    let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = query.limit.filter(|l| *l >= 1).unwrap_or(5);

    let tasks = state.store.list(query.completada).await;
    let total = tasks.len() as i64;
    // page and limit are unbounded client input; the math saturates
    let total_pages = total.saturating_add(limit - 1) / limit;

    let data: Vec<Task> = tasks
        .into_iter()
        .skip(usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect();

    Json(TaskPage {
        data,
        pagination: Pagination {
            pagina: page,
            limite: limit,
            total,
            total_pages,
        },
    })
}

/// GET /api/tareas/buscar?q= - title substring search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Task>> {
    let q = query.q.unwrap_or_default();
    Json(state.store.search(&q).await)
}

/// POST /api/tareas - create a pending task
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TaskCreate>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let titulo = payload
        .titulo
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("El título es obligatorio"))?;
    if !title_length_ok(&titulo) {
        return Err(ApiError::validation(
            "El título debe tener entre 3 y 100 caracteres",
        ));
    }

    let task = state.store.create(titulo).await;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tareas/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    state
        .store
        .find_by_id(id)
        .await
        .ok_or_else(|| ApiError::not_found("Tarea no encontrada"))?;

    if payload.titulo.is_none() && payload.completada.is_none() {
        return Err(ApiError::validation("No se enviaron campos para actualizar"));
    }
    if let Some(titulo) = &payload.titulo {
        if !title_length_ok(titulo) {
            return Err(ApiError::validation(
                "El título debe tener entre 3 y 100 caracteres",
            ));
        }
    }

    let task = state
        .store
        .update(id, payload.titulo, payload.completada)
        .await
        .ok_or_else(|| ApiError::not_found("Tarea no encontrada"))?;
    Ok(Json(task))
}
